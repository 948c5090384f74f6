//! Demolisher entry point
//!
//! Native headless runner: plays a seeded autopilot session through the full
//! application shell, logs audio cues and prints a JSON summary.
//!
//! Usage: `demolisher [--seed N] [--ticks N] [--settings PATH] [--score-file PATH]`

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use demolisher::app::{Game, Screen};
use demolisher::audio::{MusicTrack, SoundEffect};
use demolisher::persistence::{DEFAULT_SCORE_FILE, FileScoreStore};
use demolisher::platform::{AudioSink, Button, ButtonState, DrawList};
use demolisher::settings::{DEFAULT_SETTINGS_FILE, Settings};
use demolisher::sim::{GameEvent, GamePhase};

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "demolisher")]
#[command(about = "Play a seeded autopilot session of Demolisher headlessly")]
struct Options {
    /// Seed for the first run
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 60 * 60 * 3)]
    ticks: u64,
    /// Settings file (JSON)
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    /// Best score file
    #[arg(long = "score-file", default_value = DEFAULT_SCORE_FILE)]
    score_file: PathBuf,
}

/// Audio sink that logs cues instead of playing them
#[derive(Default)]
struct LogSink {
    sounds: u64,
}

impl AudioSink for LogSink {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) {
        self.sounds += 1;
        log::trace!("sfx {:?} (slot {}) vol {:.2}", effect, effect.slot(), volume);
    }

    fn play_music(&mut self, track: MusicTrack, looped: bool, volume: f32) {
        log::debug!("music {:?} (slot {}) looped={} vol {:.2}", track, track.slot(), looped, volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

/// Scripted player: aims at a random angle and power, fires, waits for the
/// shot to settle, repeats
struct Autopilot {
    rng: Pcg32,
    target_angle: f32,
    target_power: f32,
    frame: u64,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        let mut pilot = Self {
            rng: Pcg32::seed_from_u64(seed),
            target_angle: -45.0,
            target_power: 5.0,
            frame: 0,
        };
        pilot.retarget();
        pilot
    }

    fn retarget(&mut self) {
        self.target_angle = self.rng.random_range(-70.0..-15.0);
        self.target_power = self.rng.random_range(4.0..10.0);
    }

    /// Buttons held this frame (edges come from alternating frames)
    fn buttons(&mut self, game: &Game) -> Vec<Button> {
        self.frame += 1;
        let tap = self.frame % 2 == 0;

        if game.screen() == Screen::Title {
            return if tap { vec![Button::Confirm] } else { Vec::new() };
        }

        let state = game.state();
        if state.phase != GamePhase::Playing {
            return if tap { vec![Button::Confirm] } else { Vec::new() };
        }

        let mut down = Vec::new();
        if state.powerups.laser() && self.frame % 10 == 0 {
            down.push(Button::Laser);
        }
        if state.fever.active {
            down.push(Button::Fire);
            return down;
        }

        let launcher = &state.launcher;
        let mut aimed = true;
        if launcher.angle > self.target_angle + 0.6 {
            down.push(Button::Left);
            aimed = false;
        } else if launcher.angle < self.target_angle - 0.6 {
            down.push(Button::Right);
            aimed = false;
        }
        if launcher.power < self.target_power - 0.06 {
            down.push(Button::Up);
            aimed = false;
        } else if launcher.power > self.target_power + 0.06 {
            down.push(Button::Down);
            aimed = false;
        }

        if aimed && state.live_balls() == 0 && tap {
            down.push(Button::Fire);
            self.retarget();
        }
        down
    }
}

/// End-of-session report
#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    runs: u32,
    stages_cleared: u32,
    highest_stage: u32,
    last_score: u64,
    best_score: u64,
    balls_fired: u64,
    blocks_destroyed: u64,
    items_collected: u64,
    fevers: u64,
    sounds_played: u64,
}

fn main() {
    env_logger::init();
    log::info!("Demolisher (headless) starting...");

    let opts = Options::parse();

    let settings = Settings::load_from(&opts.settings);
    let mut store = FileScoreStore::new(&opts.score_file);
    log::info!("Best score file: {}", store.path().display());
    let mut game = Game::new(settings, &store, opts.seed);
    log::info!("Game initialized with seed: {}", opts.seed);

    let mut pilot = Autopilot::new(opts.seed);
    let mut input = ButtonState::new();
    let mut sink = LogSink::default();
    let mut canvas = DrawList::default();
    let mut summary = Summary {
        seed: opts.seed,
        ticks: opts.ticks,
        ..Default::default()
    };

    for _ in 0..opts.ticks {
        input.update(&pilot.buttons(&game));
        for event in game.update(&input, &mut sink, &mut store) {
            match event {
                GameEvent::RoundStarted { stage } => {
                    if stage == 0 {
                        summary.runs += 1;
                    }
                    summary.highest_stage = summary.highest_stage.max(stage + 1);
                }
                GameEvent::BallFired { .. } => summary.balls_fired += 1,
                GameEvent::BlockDestroyed { .. } => summary.blocks_destroyed += 1,
                GameEvent::ItemCollected { .. } => summary.items_collected += 1,
                GameEvent::FeverStarted => summary.fevers += 1,
                GameEvent::RoundWon { score, .. } => {
                    summary.stages_cleared += 1;
                    summary.last_score = score;
                }
                GameEvent::RoundLost { score, .. } => summary.last_score = score,
                _ => {}
            }
        }

        canvas.clear();
        game.draw(&mut canvas);
    }

    summary.best_score = game.best_score();
    summary.sounds_played = sink.sounds;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}
