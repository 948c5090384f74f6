//! Collision detection and response for axis-aligned blocks
//!
//! Balls are tested as their bounding square, lasers as the bounding box of
//! their segment. Both are cheap AABB overlap tests.

use glam::Vec2;

use super::state::{Ball, Block, Launcher, Laser};
use crate::consts::BLAST_RADIUS;

/// Axis a bounce was resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Result of resolving a normal ball against a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceResult {
    /// Collision normal axis (least penetration)
    pub axis: Axis,
    /// Penetration depth along that axis before push-out
    pub penetration: f32,
}

/// Check whether a ball's bounding square strictly overlaps a block
#[inline]
pub fn ball_overlaps_block(ball: &Ball, block: &Block) -> bool {
    let r = ball.radius;
    ball.pos.x - r < block.pos.x + block.width
        && ball.pos.x + r > block.pos.x
        && ball.pos.y - r < block.pos.y + block.height
        && ball.pos.y + r > block.pos.y
}

/// Penetration depth on each axis between a ball square and a block
#[inline]
pub fn penetration(ball: &Ball, block: &Block) -> Vec2 {
    let c = block.center();
    Vec2::new(
        (ball.radius + block.width / 2.0) - (ball.pos.x - c.x).abs(),
        (ball.radius + block.height / 2.0) - (ball.pos.y - c.y).abs(),
    )
}

/// Bounce a ball off a block it overlaps
///
/// The axis with the smaller penetration is the collision normal (ties go to
/// y). The velocity on that axis is always negated and the ball is pushed out
/// by the penetration depth, away from the block centre.
pub fn resolve_bounce(ball: &mut Ball, block: &Block) -> BounceResult {
    let overlap = penetration(ball, block);
    let c = block.center();

    if overlap.x < overlap.y {
        ball.vel.x = -ball.vel.x;
        ball.pos.x += (ball.pos.x - c.x).signum() * overlap.x;
        BounceResult {
            axis: Axis::X,
            penetration: overlap.x,
        }
    } else {
        ball.vel.y = -ball.vel.y;
        ball.pos.y += (ball.pos.y - c.y).signum() * overlap.y;
        BounceResult {
            axis: Axis::Y,
            penetration: overlap.y,
        }
    }
}

/// Laser hit test: the segment's bounding box against the block rectangle
///
/// This is intentionally the bounding-box approximation, not an exact
/// segment/rectangle intersection, so a steep ray can report a block it only
/// passes beside.
pub fn laser_hits_block(laser: &Laser, block: &Block) -> bool {
    let start = laser.origin;
    let end = laser.endpoint();
    start.x.max(end.x) >= block.pos.x
        && start.x.min(end.x) <= block.pos.x + block.width
        && start.y.max(end.y) >= block.pos.y
        && start.y.min(end.y) <= block.pos.y + block.height
}

/// Whether `other` lies inside the bomb blast centred on `struck`
///
/// Measured between top-left corners, exclusive on both axes.
#[inline]
pub fn in_blast_radius(struck: &Block, other: &Block) -> bool {
    (struck.pos.x - other.pos.x).abs() < BLAST_RADIUS
        && (struck.pos.y - other.pos.y).abs() < BLAST_RADIUS
}

/// Indices of active blocks caught in a blast at `struck_idx`, excluding the
/// struck block itself, in registry order
pub fn blast_targets(blocks: &[Block], struck_idx: usize) -> Vec<usize> {
    let struck = &blocks[struck_idx];
    blocks
        .iter()
        .enumerate()
        .filter(|&(i, b)| i != struck_idx && b.active && in_blast_radius(struck, b))
        .map(|(i, _)| i)
        .collect()
}

/// Whether a falling item is inside the launcher's pickup window
#[inline]
pub fn item_in_pickup_zone(launcher: &Launcher, item_pos: Vec2) -> bool {
    let l = launcher.pos;
    item_pos.x > l.x - 5.0 && item_pos.x < l.x + 10.0 && item_pos.y > l.y && item_pos.y < l.y + 5.0
}
