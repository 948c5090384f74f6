//! Audio cue mapping
//!
//! The simulation only reports what happened. This module decides which sound
//! effect or music change each event deserves and hands it to an
//! [`AudioSink`] with the player's volume applied.

use serde::{Deserialize, Serialize};

use crate::platform::AudioSink;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball touches a block
    Hit,
    /// Wood or glass breaks
    Crash,
    /// Stone breaks
    Crumble,
    /// Ball launched
    Fire,
    /// Item collected
    Pickup,
    /// Combo streak extended past one
    Combo,
    /// Laser fired
    Laser,
    /// Fever mode begins
    FeverStart,
    /// Launcher reached max power
    Fantastic,
}

impl SoundEffect {
    /// Sound bank slot
    pub fn slot(self) -> u8 {
        match self {
            SoundEffect::Hit => 0,
            SoundEffect::Crash => 1,
            SoundEffect::Crumble => 2,
            SoundEffect::Fire => 3,
            SoundEffect::Pickup => 4,
            SoundEffect::Combo => 5,
            SoundEffect::Laser => 6,
            SoundEffect::FeverStart => 7,
            SoundEffect::Fantastic => 8,
        }
    }
}

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    /// In-game loop
    Main,
    StageClear,
    GameOver,
    /// Fever loop
    Fever,
}

impl MusicTrack {
    pub fn slot(self) -> u8 {
        match self {
            MusicTrack::Main => 0,
            MusicTrack::StageClear => 1,
            MusicTrack::GameOver => 2,
            MusicTrack::Fever => 3,
        }
    }

    /// Whether the track repeats until stopped
    pub fn loops(self) -> bool {
        matches!(self, MusicTrack::Main | MusicTrack::Fever)
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective sound effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect, sink: &mut dyn AudioSink) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play_sound(effect, vol);
    }

    /// Switch to `track`, stopping whatever was playing
    pub fn switch_music(&self, track: MusicTrack, sink: &mut dyn AudioSink) {
        sink.stop_music();
        let vol = self.effective_music_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play_music(track, track.loops(), vol);
    }

    /// Turn simulation events into cues, in event order
    pub fn dispatch(&self, events: &[GameEvent], sink: &mut dyn AudioSink) {
        for event in events {
            match event {
                GameEvent::RoundStarted { .. } | GameEvent::FeverEnded => {
                    self.switch_music(MusicTrack::Main, sink);
                }
                GameEvent::BallFired { .. } => self.play(SoundEffect::Fire, sink),
                GameEvent::LaserFired => self.play(SoundEffect::Laser, sink),
                GameEvent::BlockHit => self.play(SoundEffect::Hit, sink),
                GameEvent::BlockDestroyed { kind, .. } => {
                    self.play(kind.spec().destruction_sound, sink);
                }
                GameEvent::ComboExtended { count } if *count > 1 => {
                    self.play(SoundEffect::Combo, sink);
                }
                GameEvent::FeverStarted => {
                    self.switch_music(MusicTrack::Fever, sink);
                    self.play(SoundEffect::FeverStart, sink);
                }
                GameEvent::ItemCollected { .. } => self.play(SoundEffect::Pickup, sink),
                GameEvent::Fantastic => self.play(SoundEffect::Fantastic, sink),
                GameEvent::RoundWon { .. } => self.switch_music(MusicTrack::StageClear, sink),
                GameEvent::RoundLost { .. } => self.switch_music(MusicTrack::GameOver, sink),
                GameEvent::ComboExtended { .. }
                | GameEvent::ComboBonus { .. }
                | GameEvent::ItemDropped { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{AudioCue, AudioLog};
    use crate::sim::{BlockKind, DamageCause};

    #[test]
    fn test_effective_volume() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        assert!((audio.effective_volume() - 0.25).abs() < 1e-6);
        audio.set_master_volume(3.0);
        assert_eq!(audio.effective_volume(), 0.5);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_destruction_sound_by_material() {
        let audio = AudioManager::new();
        let mut sink = AudioLog::default();
        let events = [
            GameEvent::BlockDestroyed {
                kind: BlockKind::Stone,
                cause: DamageCause::Impact,
            },
            GameEvent::BlockDestroyed {
                kind: BlockKind::Glass,
                cause: DamageCause::Laser,
            },
        ];
        audio.dispatch(&events, &mut sink);
        let sounds: Vec<_> = sink.sounds().collect();
        assert_eq!(sounds, vec![SoundEffect::Crumble, SoundEffect::Crash]);
    }

    #[test]
    fn test_combo_cue_only_past_one() {
        let audio = AudioManager::new();
        let mut sink = AudioLog::default();
        audio.dispatch(
            &[
                GameEvent::ComboExtended { count: 1 },
                GameEvent::ComboExtended { count: 2 },
            ],
            &mut sink,
        );
        assert_eq!(sink.sounds().collect::<Vec<_>>(), vec![SoundEffect::Combo]);
    }

    #[test]
    fn test_fever_switches_music() {
        let audio = AudioManager::new();
        let mut sink = AudioLog::default();
        audio.dispatch(&[GameEvent::FeverStarted], &mut sink);
        assert_eq!(
            sink.cues,
            vec![
                AudioCue::StopMusic,
                AudioCue::Music {
                    track: MusicTrack::Fever,
                    looped: true
                },
                AudioCue::Sound(SoundEffect::FeverStart),
            ]
        );

        sink.clear();
        audio.dispatch(&[GameEvent::FeverEnded], &mut sink);
        assert_eq!(
            sink.cues[1],
            AudioCue::Music {
                track: MusicTrack::Main,
                looped: true
            }
        );
    }

    #[test]
    fn test_round_end_music_plays_once() {
        let audio = AudioManager::new();
        let mut sink = AudioLog::default();
        audio.dispatch(&[GameEvent::RoundLost { stage: 0, score: 0 }], &mut sink);
        assert_eq!(
            sink.cues,
            vec![
                AudioCue::StopMusic,
                AudioCue::Music {
                    track: MusicTrack::GameOver,
                    looped: false
                },
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing_but_still_stops() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        let mut sink = AudioLog::default();
        audio.dispatch(&[GameEvent::BlockHit, GameEvent::RoundWon { stage: 0, score: 1 }], &mut sink);
        assert_eq!(sink.cues, vec![AudioCue::StopMusic]);
    }
}
