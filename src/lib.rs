//! Demolisher - A single-screen block demolition arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, power-ups, rounds)
//! - `renderer`: Draw-primitive rendering of a simulation snapshot
//! - `platform`: Capability traits for input, audio, drawing and storage
//! - `persistence`: Best-score storage
//! - `app`: Title/in-game flow tying the simulation to the platform

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::Game;
pub use highscores::BestScore;
pub use persistence::PersistError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (all rates are per tick)
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 150.0;
    /// Ground line sits this far above the bottom edge
    pub const GROUND_MARGIN: f32 = 5.0;

    /// Launcher placement relative to the playfield
    pub const LAUNCHER_X: f32 = 20.0;
    pub const LAUNCHER_BOTTOM_OFFSET: f32 = 10.0;
    pub const LAUNCHER_START_ANGLE: f32 = -45.0;
    pub const LAUNCHER_START_POWER: f32 = 5.0;
    pub const ANGLE_MIN: f32 = -90.0;
    pub const ANGLE_MAX: f32 = 0.0;
    pub const ANGLE_STEP: f32 = 1.0;
    pub const POWER_MIN: f32 = 1.0;
    pub const POWER_MAX: f32 = 10.0;
    pub const POWER_STEP: f32 = 0.1;

    /// Downward acceleration applied to balls
    pub const GRAVITY: f32 = 0.15;
    pub const BALL_RADIUS: f32 = 3.0;
    pub const BIG_BALL_RADIUS: f32 = 6.0;
    /// Pierce balls deactivate after this many block hits
    pub const PIERCE_LIMIT: u32 = 3;
    /// Bomb blast reach on each axis (exclusive)
    pub const BLAST_RADIUS: f32 = 20.0;

    pub const LASER_SPEED: f32 = 10.0;
    pub const ITEM_FALL_SPEED: f32 = 0.5;
    /// Chance that a destroyed block drops a power-up
    pub const ITEM_DROP_CHANCE: f64 = 0.1;

    pub const BLOCK_SIZE: f32 = 10.0;
    pub const BLOCK_SCORE: u64 = 100;
    pub const BASE_BLOCKS_PER_STAGE: u32 = 5;
    pub const BLOCKS_PER_STAGE_STEP: u32 = 2;
    pub const SHOTS_PER_ROUND: u32 = 5;

    pub const EXPLOSION_LIFE: u32 = 20;
    pub const EXPLOSION_PARTICLES: usize = 8;
    pub const PARTICLE_GRAVITY: f32 = 0.05;

    /// Power-up durations (ticks)
    pub const MULTI_BALL_TICKS: u32 = 300;
    pub const BIG_BALL_TICKS: u32 = 300;
    pub const LASER_TICKS: u32 = 120;
    /// Extra balls spawned per shot while multi-ball is active
    pub const MULTI_BALL_EXTRA: usize = 2;
    /// Angular spread (degrees, ±) of multi-ball extras
    pub const MULTI_BALL_SPREAD: f32 = 10.0;

    pub const COMBO_WINDOW_TICKS: u32 = 30;
    pub const COMBO_BONUS_PER_HIT: u64 = 50;

    pub const FEVER_COMBO_THRESHOLD: u32 = 10;
    pub const FEVER_TICKS: u32 = 600;
    pub const FEVER_SHOT_COOLDOWN: u32 = 5;
    pub const FEVER_POWER_MULTIPLIER: f32 = 1.5;

    pub const FANTASTIC_TICKS: u32 = 60;

    /// Screen shake triggers and decay
    pub const SHAKE_LASER: f32 = 1.0;
    pub const SHAKE_HIT: f32 = 2.0;
    pub const SHAKE_BLAST: f32 = 4.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_CUTOFF: f32 = 0.1;

    /// Nominal frame rate used for HUD second readouts
    pub const TICKS_PER_SECOND: u32 = 60;
}

/// 16-color palette indices shared by the simulation's attribute tables and the renderer
pub mod palette {
    pub const BLACK: u8 = 0;
    pub const NAVY: u8 = 1;
    pub const PURPLE: u8 = 2;
    pub const GREEN: u8 = 3;
    pub const BROWN: u8 = 4;
    pub const DARK_BLUE: u8 = 5;
    pub const LIGHT_BLUE: u8 = 6;
    pub const WHITE: u8 = 7;
    pub const RED: u8 = 8;
    pub const ORANGE: u8 = 9;
    pub const YELLOW: u8 = 10;
    pub const LIME: u8 = 11;
    pub const CYAN: u8 = 12;
    pub const GRAY: u8 = 13;
    pub const PINK: u8 = 14;
    pub const PEACH: u8 = 15;
    pub const COUNT: u8 = 16;
}

/// Unit direction for an angle in degrees (0° = right, clockwise with y down)
#[inline]
pub fn direction_from_degrees(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Velocity for a launch at `angle` degrees with linear speed `power`
#[inline]
pub fn launch_velocity(angle: f32, power: f32) -> Vec2 {
    direction_from_degrees(angle) * power
}
