//! Platform abstraction layer
//!
//! The game core talks to the outside world only through these traits:
//! - Input polling ([`InputSource`])
//! - Sound and music playback ([`AudioSink`])
//! - 2D drawing in palette colors ([`Canvas`])
//! - Best score storage ([`ScoreStore`])
//!
//! Headless implementations used by the binary and tests live here too.

use glam::Vec2;

use crate::audio::{MusicTrack, SoundEffect};
use crate::persistence::PersistError;

/// Logical buttons the game polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Laser,
    Confirm,
}

impl Button {
    pub const COUNT: usize = 7;
    pub const ALL: [Button; Self::COUNT] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Fire,
        Button::Laser,
        Button::Confirm,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Polled button state for the current frame
pub trait InputSource {
    /// Button is down this frame
    fn held(&self, button: Button) -> bool;
    /// Button went down this frame (was up last frame)
    fn pressed(&self, button: Button) -> bool;
}

/// Edge-detecting button state fed with the set of buttons down each frame
#[derive(Debug, Clone, Default)]
pub struct ButtonState {
    held: [bool; Button::COUNT],
    pressed: [bool; Button::COUNT],
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with `down` held
    pub fn update(&mut self, down: &[Button]) {
        let mut now = [false; Button::COUNT];
        for button in down {
            now[button.index()] = true;
        }
        for i in 0..Button::COUNT {
            self.pressed[i] = now[i] && !self.held[i];
        }
        self.held = now;
    }
}

impl InputSource for ButtonState {
    fn held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    fn pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}

/// Audio backend
pub trait AudioSink {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, track: MusicTrack, looped: bool, volume: f32);
    fn stop_music(&mut self);
}

/// A cue received by [`AudioLog`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    Sound(SoundEffect),
    Music { track: MusicTrack, looped: bool },
    StopMusic,
}

/// Audio sink that records cues instead of playing them
#[derive(Debug, Clone, Default)]
pub struct AudioLog {
    pub cues: Vec<AudioCue>,
}

impl AudioLog {
    pub fn sounds(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        self.cues.iter().filter_map(|c| match c {
            AudioCue::Sound(s) => Some(*s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl AudioSink for AudioLog {
    fn play_sound(&mut self, effect: SoundEffect, _volume: f32) {
        self.cues.push(AudioCue::Sound(effect));
    }

    fn play_music(&mut self, track: MusicTrack, looped: bool, _volume: f32) {
        self.cues.push(AudioCue::Music { track, looped });
    }

    fn stop_music(&mut self) {
        self.cues.push(AudioCue::StopMusic);
    }
}

/// Drawing primitives in playfield coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Fill the whole screen
    Clear,
    Rect { pos: Vec2, size: Vec2, filled: bool },
    Circle { center: Vec2, radius: f32, filled: bool },
    Line { from: Vec2, to: Vec2 },
    Triangle { a: Vec2, b: Vec2, c: Vec2 },
    Text { pos: Vec2, text: String },
    Pixel { pos: Vec2 },
}

impl Primitive {
    /// Same primitive moved by `offset` (Clear is unaffected)
    pub fn translated(self, offset: Vec2) -> Self {
        match self {
            Primitive::Clear => Primitive::Clear,
            Primitive::Rect { pos, size, filled } => Primitive::Rect {
                pos: pos + offset,
                size,
                filled,
            },
            Primitive::Circle {
                center,
                radius,
                filled,
            } => Primitive::Circle {
                center: center + offset,
                radius,
                filled,
            },
            Primitive::Line { from, to } => Primitive::Line {
                from: from + offset,
                to: to + offset,
            },
            Primitive::Triangle { a, b, c } => Primitive::Triangle {
                a: a + offset,
                b: b + offset,
                c: c + offset,
            },
            Primitive::Text { pos, text } => Primitive::Text {
                pos: pos + offset,
                text,
            },
            Primitive::Pixel { pos } => Primitive::Pixel { pos: pos + offset },
        }
    }
}

/// Draw target taking 16-color palette indices
pub trait Canvas {
    fn draw(&mut self, primitive: Primitive, color: u8);
}

/// Canvas that records every primitive in draw order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<(Primitive, u8)>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn this frame in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|(p, _)| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Canvas for DrawList {
    fn draw(&mut self, primitive: Primitive, color: u8) {
        self.commands.push((primitive, color));
    }
}

/// Persistent best score slot
pub trait ScoreStore {
    /// Stored best, 0 when nothing usable is stored
    fn load_best_score(&self) -> u64;
    fn persist_best_score(&mut self, score: u64) -> Result<(), PersistError>;
}
