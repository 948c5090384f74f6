//! Stage layout and round-end rules

use glam::Vec2;
use rand::Rng;

use super::state::{Block, BlockKind, GamePhase, GameState, Playfield};
use crate::consts::*;

/// Number of blocks laid out for a stage
#[inline]
pub fn block_count(stage: u32) -> u32 {
    BASE_BLOCKS_PER_STAGE + stage * BLOCKS_PER_STAGE_STEP
}

/// Scatter the stage's blocks over the right half of the playfield
///
/// Kinds are drawn uniformly from wood/stone/glass; x is a whole number in
/// `[width/2, width-20]` and each block floats a whole number of units in
/// `[10, height/2]` above the ground line.
pub fn generate_blocks<R: Rng + ?Sized>(stage: u32, playfield: &Playfield, rng: &mut R) -> Vec<Block> {
    let x_min = (playfield.width / 2.0) as i32;
    let x_max = (playfield.width - 20.0) as i32;
    let lift_max = (playfield.height / 2.0) as i32;
    let ground = playfield.ground_y();

    (0..block_count(stage))
        .map(|_| {
            let kind = BlockKind::GENERATED[rng.random_range(0..BlockKind::GENERATED.len())];
            let x = rng.random_range(x_min..=x_max) as f32;
            let lift = rng.random_range(10..=lift_max) as f32;
            Block::new(Vec2::new(x, ground - lift), BLOCK_SIZE, BLOCK_SIZE, kind)
        })
        .collect()
}

/// Decide whether the round just ended
///
/// Win is checked first; loss additionally needs a remaining block so the two
/// can never fire on the same tick.
pub fn round_outcome(state: &GameState) -> Option<GamePhase> {
    let blocks_left = state.active_blocks();
    if blocks_left == 0 {
        return Some(GamePhase::Won);
    }
    if state.shots_left == 0 && state.live_balls() == 0 && blocks_left > 0 {
        return Some(GamePhase::Lost);
    }
    None
}
