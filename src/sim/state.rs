//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{Explosion, ScreenShake};
use super::modifiers::{Combo, Fantastic, Fever, PowerUps};
use super::tick::TickInput;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::palette;

/// Fixed playfield extents, read once when a state is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Y coordinate of the ground line blocks stand on
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_MARGIN
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every block destroyed, waiting for confirm to start the next stage
    Won,
    /// Out of shots with blocks remaining
    Lost,
}

/// The player's aimable launcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    /// Degrees, clamped to [-90, 0]
    pub angle: f32,
    /// Launch speed, clamped to [1, 10]
    pub power: f32,
}

impl Launcher {
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            pos: Vec2::new(LAUNCHER_X, playfield.height - LAUNCHER_BOTTOM_OFFSET),
            angle: LAUNCHER_START_ANGLE,
            power: LAUNCHER_START_POWER,
        }
    }

    /// Apply held aim/power buttons for one tick
    pub fn update(&mut self, input: &TickInput) {
        if input.left {
            self.angle -= ANGLE_STEP;
        }
        if input.right {
            self.angle += ANGLE_STEP;
        }
        self.angle = self.angle.clamp(ANGLE_MIN, ANGLE_MAX);

        if input.up {
            self.power += POWER_STEP;
        }
        if input.down {
            self.power -= POWER_STEP;
        }
        self.power = self.power.clamp(POWER_MIN, POWER_MAX);
    }

    #[inline]
    pub fn is_at_max_power(&self) -> bool {
        self.power >= POWER_MAX
    }
}

/// Ammunition types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallKind {
    #[default]
    Normal,
    /// Detonates on first impact, damaging neighbours
    Bomb,
    /// Passes through up to three blocks
    Pierce,
}

impl BallKind {
    /// Ammo cycles normal → bomb → pierce across stages
    pub fn for_stage(stage: u32) -> Self {
        match stage % 3 {
            1 => BallKind::Bomb,
            2 => BallKind::Pierce,
            _ => BallKind::Normal,
        }
    }
}

/// A projectile under gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: BallKind,
    pub active: bool,
    /// Blocks struck so far (pierce balls only)
    pub pierce_count: u32,
}

impl Ball {
    pub fn new(pos: Vec2, angle: f32, power: f32, kind: BallKind, radius: f32) -> Self {
        Self {
            pos,
            vel: crate::launch_velocity(angle, power),
            radius,
            kind,
            active: true,
            pierce_count: 0,
        }
    }

    /// Integrate one tick of gravity and motion
    pub fn advance(&mut self, playfield: &Playfield) {
        if !self.active {
            return;
        }
        self.vel.y += GRAVITY;
        self.pos += self.vel;

        let r = self.radius;
        if self.pos.x < -r || self.pos.x > playfield.width + r || self.pos.y > playfield.height + r {
            self.active = false;
        }
    }
}

/// An ever-extending ray fired while the laser power-up is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub origin: Vec2,
    /// Degrees, fixed at fire time
    pub angle: f32,
    pub length: f32,
    pub active: bool,
}

impl Laser {
    pub fn new(origin: Vec2, angle: f32) -> Self {
        Self {
            origin,
            angle,
            length: 0.0,
            active: true,
        }
    }

    pub fn advance(&mut self, playfield: &Playfield) {
        if !self.active {
            return;
        }
        self.length += LASER_SPEED;
        if self.length > playfield.width {
            self.active = false;
        }
    }

    /// Current tip of the ray
    pub fn endpoint(&self) -> Vec2 {
        self.origin + crate::direction_from_degrees(self.angle) * self.length
    }
}

/// Block materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Wood,
    Stone,
    Glass,
    /// Never generated; keeps the table total for unknown materials
    Fallback,
}

/// Fixed per-kind block attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub max_hp: i32,
    pub base_color: u8,
    pub highlight_color: u8,
    pub shadow_color: u8,
    pub explosion_color: u8,
    pub destruction_sound: SoundEffect,
}

const WOOD: BlockSpec = BlockSpec {
    max_hp: 1,
    base_color: palette::BROWN,
    highlight_color: palette::YELLOW,
    shadow_color: palette::PURPLE,
    explosion_color: palette::DARK_BLUE,
    destruction_sound: SoundEffect::Crash,
};

const STONE: BlockSpec = BlockSpec {
    max_hp: 1,
    base_color: palette::GRAY,
    highlight_color: palette::WHITE,
    shadow_color: palette::LIGHT_BLUE,
    explosion_color: palette::BLACK,
    destruction_sound: SoundEffect::Crumble,
};

const GLASS: BlockSpec = BlockSpec {
    max_hp: 1,
    base_color: palette::CYAN,
    highlight_color: palette::WHITE,
    shadow_color: palette::DARK_BLUE,
    explosion_color: palette::WHITE,
    destruction_sound: SoundEffect::Crash,
};

const FALLBACK: BlockSpec = BlockSpec {
    max_hp: 1,
    base_color: palette::GREEN,
    highlight_color: palette::WHITE,
    shadow_color: palette::PURPLE,
    explosion_color: palette::DARK_BLUE,
    destruction_sound: SoundEffect::Crash,
};

impl BlockKind {
    /// Kinds the stage generator picks from
    pub const GENERATED: [BlockKind; 3] = [BlockKind::Wood, BlockKind::Stone, BlockKind::Glass];

    pub fn spec(self) -> &'static BlockSpec {
        match self {
            BlockKind::Wood => &WOOD,
            BlockKind::Stone => &STONE,
            BlockKind::Glass => &GLASS,
            BlockKind::Fallback => &FALLBACK,
        }
    }
}

/// A destructible axis-aligned block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: BlockKind,
    pub hp: i32,
    pub max_hp: i32,
    pub active: bool,
}

impl Block {
    pub fn new(pos: Vec2, width: f32, height: f32, kind: BlockKind) -> Self {
        let max_hp = kind.spec().max_hp;
        Self {
            pos,
            width,
            height,
            kind,
            hp: max_hp,
            max_hp,
            active: true,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn spec(&self) -> &'static BlockSpec {
        self.kind.spec()
    }

    /// Apply damage; returns true exactly once, on the hit that destroys it
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.active {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    MultiBall,
    BigBall,
    LaserBeam,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::MultiBall, ItemKind::BigBall, ItemKind::LaserBeam];
}

/// A falling power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub kind: ItemKind,
    pub active: bool,
}

impl Item {
    pub fn new(pos: Vec2, kind: ItemKind) -> Self {
        Self {
            pos,
            kind,
            active: true,
        }
    }

    pub fn advance(&mut self, playfield: &Playfield) {
        if !self.active {
            return;
        }
        self.pos.y += ITEM_FALL_SPEED;
        if self.pos.y > playfield.height {
            self.active = false;
        }
    }
}

/// What destroyed a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    /// Direct ball contact
    Impact,
    /// Bomb area damage
    Blast,
    Laser,
}

/// Notable things that happened during a tick, drained by the application
/// layer to drive audio and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted { stage: u32 },
    BallFired { kind: BallKind, fever: bool },
    LaserFired,
    /// A ball touched a block (emitted whether or not it broke)
    BlockHit,
    BlockDestroyed { kind: BlockKind, cause: DamageCause },
    ComboExtended { count: u32 },
    ComboBonus { count: u32, bonus: u64 },
    FeverStarted,
    FeverEnded,
    ItemDropped { kind: ItemKind },
    ItemCollected { kind: ItemKind },
    Fantastic,
    RoundWon { stage: u32, score: u64 },
    RoundLost { stage: u32, score: u64 },
}

/// Complete game state for one run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub playfield: Playfield,
    /// Current stage index (0-based)
    pub stage: u32,
    pub phase: GamePhase,
    pub score: u64,
    pub shots_left: u32,
    /// Ammo fired by manual shots this stage
    pub ammo: BallKind,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub launcher: Launcher,
    pub balls: Vec<Ball>,
    pub blocks: Vec<Block>,
    pub items: Vec<Item>,
    pub lasers: Vec<Laser>,
    pub explosions: Vec<Explosion>,
    pub powerups: PowerUps,
    pub combo: Combo,
    pub fever: Fever,
    pub fantastic: Fantastic,
    pub shake: ScreenShake,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run at stage 0 with the default playfield
    pub fn new(seed: u64) -> Self {
        Self::with_playfield(seed, Playfield::default())
    }

    pub fn with_playfield(seed: u64, playfield: Playfield) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            stage: 0,
            phase: GamePhase::Playing,
            score: 0,
            shots_left: SHOTS_PER_ROUND,
            ammo: BallKind::Normal,
            time_ticks: 0,
            launcher: Launcher::new(&playfield),
            balls: Vec::new(),
            blocks: Vec::new(),
            items: Vec::new(),
            lasers: Vec::new(),
            explosions: Vec::new(),
            powerups: PowerUps::default(),
            combo: Combo::default(),
            fever: Fever::default(),
            fantastic: Fantastic::default(),
            shake: ScreenShake::default(),
            events: Vec::new(),
        };

        state.start_round();
        state
    }

    /// Reset per-round state and lay out a fresh block field for `self.stage`
    pub fn start_round(&mut self) {
        self.phase = GamePhase::Playing;
        self.shots_left = SHOTS_PER_ROUND;
        self.ammo = BallKind::for_stage(self.stage);
        self.launcher = Launcher::new(&self.playfield);
        self.balls.clear();
        self.items.clear();
        self.lasers.clear();
        self.explosions.clear();
        self.powerups = PowerUps::default();
        self.combo = Combo::default();
        self.fever = Fever::default();
        self.fantastic = Fantastic::default();
        self.shake = ScreenShake::default();

        self.blocks = super::stage::generate_blocks(self.stage, &self.playfield, &mut self.rng);

        log::info!(
            "Stage {}: {} blocks, {:?} ammo",
            self.stage + 1,
            self.blocks.len(),
            self.ammo
        );
        self.events.push(GameEvent::RoundStarted { stage: self.stage });
    }

    /// Advance to the next stage after a win (score carries over)
    pub fn next_stage(&mut self) {
        self.stage += 1;
        self.start_round();
    }

    pub fn live_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.active).count()
    }

    pub fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_clamps_angle_and_power() {
        let mut launcher = Launcher::new(&Playfield::default());
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..200 {
            launcher.update(&input);
        }
        assert_eq!(launcher.angle, ANGLE_MIN);
        assert_eq!(launcher.power, POWER_MAX);

        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..200 {
            launcher.update(&input);
        }
        assert_eq!(launcher.angle, ANGLE_MAX);
        assert_eq!(launcher.power, POWER_MIN);
    }

    #[test]
    fn test_ball_gravity_integration() {
        let pf = Playfield::default();
        let mut ball = Ball::new(Vec2::new(50.0, 50.0), 0.0, 2.0, BallKind::Normal, BALL_RADIUS);
        ball.advance(&pf);
        assert!((ball.vel.y - GRAVITY).abs() < 1e-6);
        assert!((ball.pos.x - 52.0).abs() < 1e-5);
        assert!((ball.pos.y - (50.0 + GRAVITY)).abs() < 1e-5);
        assert!(ball.active);
    }

    #[test]
    fn test_ball_deactivates_off_field() {
        let pf = Playfield::default();

        let mut left = Ball::new(Vec2::new(-2.5, 50.0), 180.0, 1.0, BallKind::Normal, 3.0);
        left.advance(&pf);
        assert!(!left.active);

        let mut right = Ball::new(Vec2::new(pf.width + 2.5, 50.0), 0.0, 1.0, BallKind::Normal, 3.0);
        right.advance(&pf);
        assert!(!right.active);

        let mut below = Ball::new(Vec2::new(50.0, pf.height + 2.9), 0.0, 0.0, BallKind::Normal, 3.0);
        below.advance(&pf);
        assert!(!below.active);

        // No ceiling: a ball high above the field stays live
        let mut above = Ball::new(Vec2::new(50.0, -100.0), 0.0, 0.0, BallKind::Normal, 3.0);
        above.advance(&pf);
        assert!(above.active);
    }

    #[test]
    fn test_ball_deactivation_is_monotonic() {
        let pf = Playfield::default();
        let mut ball = Ball::new(Vec2::new(-10.0, 50.0), 0.0, 5.0, BallKind::Normal, 3.0);
        ball.active = false;
        let pos = ball.pos;
        ball.advance(&pf);
        assert!(!ball.active);
        assert_eq!(ball.pos, pos);
    }

    #[test]
    fn test_laser_grows_until_past_width() {
        let pf = Playfield::default();
        let mut laser = Laser::new(Vec2::new(20.0, 140.0), -45.0);
        for _ in 0..20 {
            laser.advance(&pf);
            assert!(laser.active);
        }
        assert_eq!(laser.length, 200.0);
        laser.advance(&pf);
        assert!(!laser.active);
    }

    #[test]
    fn test_item_falls_and_expires() {
        let pf = Playfield::default();
        let mut item = Item::new(Vec2::new(100.0, pf.height - 0.25), ItemKind::BigBall);
        item.advance(&pf);
        assert!(!item.active);

        let mut item = Item::new(Vec2::new(100.0, 10.0), ItemKind::BigBall);
        item.advance(&pf);
        assert_eq!(item.pos.y, 10.5);
        assert!(item.active);
    }

    #[test]
    fn test_block_take_damage() {
        let mut block = Block::new(Vec2::new(100.0, 100.0), 10.0, 10.0, BlockKind::Stone);
        assert_eq!(block.hp, 1);
        assert_eq!(block.max_hp, 1);
        assert!(block.take_damage(1));
        assert!(!block.active);
        // Already destroyed: no second report
        assert!(!block.take_damage(1));
    }

    #[test]
    fn test_block_multi_hp() {
        let mut block = Block::new(Vec2::ZERO, 10.0, 10.0, BlockKind::Wood);
        block.hp = 3;
        block.max_hp = 3;
        assert!(!block.take_damage(1));
        assert!(!block.take_damage(1));
        assert!(block.active);
        assert!(block.take_damage(1));
        assert!(!block.active);
    }

    #[test]
    fn test_block_spec_table() {
        assert_eq!(BlockKind::Stone.spec().destruction_sound, SoundEffect::Crumble);
        assert_eq!(BlockKind::Wood.spec().destruction_sound, SoundEffect::Crash);
        assert_eq!(BlockKind::Glass.spec().explosion_color, palette::WHITE);
        for kind in BlockKind::GENERATED {
            assert_eq!(kind.spec().max_hp, 1);
        }
    }

    #[test]
    fn test_ammo_cycles_by_stage() {
        assert_eq!(BallKind::for_stage(0), BallKind::Normal);
        assert_eq!(BallKind::for_stage(1), BallKind::Bomb);
        assert_eq!(BallKind::for_stage(2), BallKind::Pierce);
        assert_eq!(BallKind::for_stage(3), BallKind::Normal);
    }

    #[test]
    fn test_new_state_starts_round() {
        let mut state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.blocks.len(), 5);
        assert_eq!(state.shots_left, SHOTS_PER_ROUND);
        assert_eq!(state.drain_events(), vec![GameEvent::RoundStarted { stage: 0 }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_next_stage_keeps_score() {
        let mut state = GameState::new(7);
        state.score = 1200;
        state.next_stage();
        assert_eq!(state.stage, 1);
        assert_eq!(state.score, 1200);
        assert_eq!(state.ammo, BallKind::Bomb);
        assert_eq!(state.blocks.len(), 7);
    }
}
