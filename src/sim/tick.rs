//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a tick
//! the order is: timers, launcher input, firing, lasers, balls, explosions,
//! items, purge, round end.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    ball_overlaps_block, blast_targets, item_in_pickup_zone, laser_hits_block, resolve_bounce,
};
use super::effects::Explosion;
use super::stage::round_outcome;
use super::state::{
    Ball, BallKind, DamageCause, GameEvent, GamePhase, GameState, Item, ItemKind, Laser,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim up/down the arc (held)
    pub left: bool,
    pub right: bool,
    /// Power up/down (held)
    pub up: bool,
    pub down: bool,
    /// Fire button is down this tick (fever auto-fire)
    pub fire_held: bool,
    /// Fire button went down this tick
    pub fire_pressed: bool,
    /// Laser button went down this tick
    pub laser_pressed: bool,
    /// Confirm went down this tick (advances past a cleared stage)
    pub confirm: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Won => {
            if input.confirm {
                state.next_stage();
            }
            return;
        }
        // Leaving a lost round is up to the application shell
        GamePhase::Lost => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    decay_timers(state);

    state.launcher.update(input);
    if state.fantastic.observe(state.launcher.is_at_max_power()) {
        state.events.push(GameEvent::Fantastic);
    }

    fire(state, input);

    update_lasers(state);
    update_balls(state);
    for explosion in &mut state.explosions {
        explosion.advance();
    }
    update_items(state);

    purge_inactive(state);

    if let Some(outcome) = round_outcome(state) {
        finish_round(state, outcome);
    }
}

fn decay_timers(state: &mut GameState) {
    state.shake.decay();

    if let Some((count, bonus)) = state.combo.tick() {
        state.score += bonus;
        log::debug!("Combo x{} lapsed: +{}", count, bonus);
        state.events.push(GameEvent::ComboBonus { count, bonus });
    }

    if state.powerups.tick().big_ball_ended {
        for ball in state.balls.iter_mut().filter(|b| b.active) {
            ball.radius = BALL_RADIUS;
        }
    }

    if state.fever.tick() {
        log::info!("Fever over");
        state.events.push(GameEvent::FeverEnded);
    }

    state.fantastic.tick();
}

fn fire(state: &mut GameState, input: &TickInput) {
    let origin = state.launcher.pos;
    let angle = state.launcher.angle;
    let power = state.launcher.power;
    let radius = state.powerups.ball_radius();

    if state.fever.active {
        // Auto-fire while held; fever shots are free
        if input.fire_held && state.fever.can_fire() {
            let fever_power = power * FEVER_POWER_MULTIPLIER;
            state
                .balls
                .push(Ball::new(origin, angle, fever_power, BallKind::Normal, radius));
            state.fever.mark_fired();
            state.events.push(GameEvent::BallFired {
                kind: BallKind::Normal,
                fever: true,
            });
        }
    } else if input.fire_pressed && state.shots_left > 0 {
        let kind = state.ammo;
        state.balls.push(Ball::new(origin, angle, power, kind, radius));
        state.shots_left -= 1;
        state.events.push(GameEvent::BallFired { kind, fever: false });

        if state.powerups.multi_ball() {
            for _ in 0..MULTI_BALL_EXTRA {
                let spread = state
                    .rng
                    .random_range(-MULTI_BALL_SPREAD..=MULTI_BALL_SPREAD);
                state
                    .balls
                    .push(Ball::new(origin, angle + spread, power, kind, radius));
            }
        }
    }

    if state.powerups.laser() && input.laser_pressed {
        state.lasers.push(Laser::new(origin, angle));
        state.events.push(GameEvent::LaserFired);
    }
}

fn update_lasers(state: &mut GameState) {
    let playfield = state.playfield;

    for li in 0..state.lasers.len() {
        state.lasers[li].advance(&playfield);
        if !state.lasers[li].active {
            continue;
        }

        for bi in 0..state.blocks.len() {
            if !state.blocks[bi].active || !laser_hits_block(&state.lasers[li], &state.blocks[bi]) {
                continue;
            }
            if state.blocks[bi].take_damage(1) {
                on_block_destroyed(state, bi, DamageCause::Laser);
            }
        }
    }
}

fn update_balls(state: &mut GameState) {
    let playfield = state.playfield;

    for ball_idx in 0..state.balls.len() {
        state.balls[ball_idx].advance(&playfield);

        for block_idx in 0..state.blocks.len() {
            // A ball spent mid-tick stops colliding
            if !state.balls[ball_idx].active {
                break;
            }
            if !state.blocks[block_idx].active
                || !ball_overlaps_block(&state.balls[ball_idx], &state.blocks[block_idx])
            {
                continue;
            }

            match state.balls[ball_idx].kind {
                BallKind::Normal => {
                    resolve_bounce(&mut state.balls[ball_idx], &state.blocks[block_idx]);
                }
                BallKind::Bomb => {
                    state.balls[ball_idx].active = false;
                    for target in blast_targets(&state.blocks, block_idx) {
                        if state.blocks[target].take_damage(1) {
                            on_block_destroyed(state, target, DamageCause::Blast);
                        }
                    }
                }
                BallKind::Pierce => {
                    let ball = &mut state.balls[ball_idx];
                    ball.pierce_count += 1;
                    if ball.pierce_count >= PIERCE_LIMIT {
                        ball.active = false;
                    }
                }
            }

            state.events.push(GameEvent::BlockHit);
            if state.blocks[block_idx].take_damage(1) {
                on_block_destroyed(state, block_idx, DamageCause::Impact);
            }
        }
    }
}

/// Score, explosion, shake and (cause permitting) combo and item drop for a
/// block that was just destroyed
fn on_block_destroyed(state: &mut GameState, idx: usize, cause: DamageCause) {
    let block = &state.blocks[idx];
    let kind = block.kind;
    let corner = block.pos;
    let center = block.center();
    let color = block.spec().explosion_color;

    state.score += BLOCK_SCORE;
    let explosion = Explosion::spawn(center, color, &mut state.rng);
    state.explosions.push(explosion);
    state.events.push(GameEvent::BlockDestroyed { kind, cause });

    match cause {
        DamageCause::Laser => state.shake.trigger(SHAKE_LASER),
        DamageCause::Blast => {
            state.shake.trigger(SHAKE_BLAST);
            maybe_drop_item(state, corner);
        }
        DamageCause::Impact => {
            state.shake.trigger(SHAKE_HIT);
            let count = state.combo.extend();
            state.events.push(GameEvent::ComboExtended { count });
            if state.fever.try_start(count) {
                log::info!("FEVER MODE! (combo x{})", count);
                state.events.push(GameEvent::FeverStarted);
            }
            maybe_drop_item(state, corner);
        }
    }
}

fn maybe_drop_item(state: &mut GameState, pos: Vec2) {
    if !state.rng.random_bool(ITEM_DROP_CHANCE) {
        return;
    }
    let kind = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
    log::debug!("Item drop: {:?} at ({}, {})", kind, pos.x, pos.y);
    state.items.push(Item::new(pos, kind));
    state.events.push(GameEvent::ItemDropped { kind });
}

fn update_items(state: &mut GameState) {
    let playfield = state.playfield;
    let mut collected = Vec::new();

    for item in &mut state.items {
        item.advance(&playfield);
        if item.active && item_in_pickup_zone(&state.launcher, item.pos) {
            item.active = false;
            collected.push(item.kind);
        }
    }

    for kind in collected {
        collect_item(state, kind);
    }
}

fn collect_item(state: &mut GameState, kind: ItemKind) {
    state.powerups.activate(kind);
    if kind == ItemKind::BigBall {
        for ball in state.balls.iter_mut().filter(|b| b.active) {
            ball.radius = BIG_BALL_RADIUS;
        }
    }
    log::debug!("Picked up {:?}", kind);
    state.events.push(GameEvent::ItemCollected { kind });
}

fn purge_inactive(state: &mut GameState) {
    state.balls.retain(|b| b.active);
    state.blocks.retain(|b| b.active);
    state.items.retain(|i| i.active);
    state.lasers.retain(|l| l.active);
    state.explosions.retain(|e| e.is_alive());
}

fn finish_round(state: &mut GameState, outcome: GamePhase) {
    state.phase = outcome;
    let stage = state.stage;
    let score = state.score;

    match outcome {
        GamePhase::Won => {
            log::info!("Stage {} clear! score={}", stage + 1, score);
            state.balls.clear();
            state.shots_left = 0;
            state.events.push(GameEvent::RoundWon { stage, score });
        }
        GamePhase::Lost => {
            log::info!("Game over on stage {} with score={}", stage + 1, score);
            state.events.push(GameEvent::RoundLost { stage, score });
        }
        GamePhase::Playing => {}
    }
}
