//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] per frame)
//! - Seeded RNG only
//! - Stable iteration order (registry order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod modifiers;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{Axis, BounceResult, ball_overlaps_block, blast_targets, laser_hits_block, resolve_bounce};
pub use effects::{Explosion, Particle, ScreenShake};
pub use modifiers::{Combo, Fantastic, Fever, PowerUps};
pub use stage::{block_count, generate_blocks, round_outcome};
pub use state::{
    Ball, BallKind, Block, BlockKind, BlockSpec, DamageCause, GameEvent, GamePhase, GameState,
    Item, ItemKind, Laser, Launcher, Playfield,
};
pub use tick::{TickInput, tick};
