//! Timer-driven gameplay modifiers: power-ups, combo streaks, fever mode and
//! the max-power "FANTASTIC" cue
//!
//! Each modifier is independent; the tick loop decays them once per tick and
//! feeds them collision outcomes.

use serde::{Deserialize, Serialize};

use super::state::ItemKind;
use crate::consts::*;

/// Remaining ticks for each pickup effect (0 = inactive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    pub multi_ball_ticks: u32,
    pub big_ball_ticks: u32,
    pub laser_ticks: u32,
}

/// Transitions reported by [`PowerUps::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerUpExpiry {
    pub big_ball_ended: bool,
}

impl PowerUps {
    /// Refresh the timer for `kind` (repeat pickups do not stack)
    pub fn activate(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::MultiBall => self.multi_ball_ticks = MULTI_BALL_TICKS,
            ItemKind::BigBall => self.big_ball_ticks = BIG_BALL_TICKS,
            ItemKind::LaserBeam => self.laser_ticks = LASER_TICKS,
        }
    }

    pub fn tick(&mut self) -> PowerUpExpiry {
        self.multi_ball_ticks = self.multi_ball_ticks.saturating_sub(1);
        self.laser_ticks = self.laser_ticks.saturating_sub(1);

        let mut expiry = PowerUpExpiry::default();
        if self.big_ball_ticks > 0 {
            self.big_ball_ticks -= 1;
            expiry.big_ball_ended = self.big_ball_ticks == 0;
        }
        expiry
    }

    #[inline]
    pub fn multi_ball(&self) -> bool {
        self.multi_ball_ticks > 0
    }

    #[inline]
    pub fn big_ball(&self) -> bool {
        self.big_ball_ticks > 0
    }

    #[inline]
    pub fn laser(&self) -> bool {
        self.laser_ticks > 0
    }

    /// Radius for newly fired balls
    pub fn ball_radius(&self) -> f32 {
        if self.big_ball() { BIG_BALL_RADIUS } else { BALL_RADIUS }
    }
}

/// Consecutive-destruction streak
///
/// The bonus is paid once, when the window lapses, never incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    pub timer: u32,
}

impl Combo {
    /// Record a destruction; returns the new streak length
    pub fn extend(&mut self) -> u32 {
        self.count += 1;
        self.timer = COMBO_WINDOW_TICKS;
        self.count
    }

    /// Count down the window. The tick after it reaches 0 the streak lapses:
    /// returns `(count, bonus)` for streaks longer than one and resets the
    /// count, so a destruction exactly `COMBO_WINDOW_TICKS` later still extends
    pub fn tick(&mut self) -> Option<(u32, u64)> {
        if self.timer > 0 {
            self.timer -= 1;
            return None;
        }

        let count = std::mem::take(&mut self.count);
        (count > 1).then(|| (count, count as u64 * COMBO_BONUS_PER_HIT))
    }
}

/// Rapid-fire mode unlocked by a long combo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fever {
    pub active: bool,
    pub ticks: u32,
    /// Ticks until the next fever shot may fire
    pub cooldown: u32,
}

impl Fever {
    /// Start fever if the streak just reached the threshold; returns true on start
    pub fn try_start(&mut self, combo_count: u32) -> bool {
        if self.active || combo_count < FEVER_COMBO_THRESHOLD {
            return false;
        }
        self.active = true;
        self.ticks = FEVER_TICKS;
        self.cooldown = 0;
        true
    }

    /// Count down; returns true on the tick fever ends
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            self.active = false;
            self.cooldown = 0;
            return true;
        }
        self.cooldown = self.cooldown.saturating_sub(1);
        false
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.active && self.cooldown == 0
    }

    pub fn mark_fired(&mut self) {
        self.cooldown = FEVER_SHOT_COOLDOWN;
    }
}

/// Edge-triggered banner shown when launcher power first reaches max
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fantastic {
    pub display_ticks: u32,
    /// Whether power was at max on the previous tick
    pub was_max: bool,
}

impl Fantastic {
    /// Observe this tick's at-max state; returns true on the rising edge
    pub fn observe(&mut self, at_max: bool) -> bool {
        let rising = at_max && !self.was_max;
        if rising {
            self.display_ticks = FANTASTIC_TICKS;
        }
        self.was_max = at_max;
        rising
    }

    pub fn tick(&mut self) {
        self.display_ticks = self.display_ticks.saturating_sub(1);
    }

    #[inline]
    pub fn is_showing(&self) -> bool {
        self.display_ticks > 0
    }
}
