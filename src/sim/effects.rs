//! Cosmetic feedback: explosion particle bursts and screen shake
//!
//! Nothing here feeds back into collisions or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A single explosion particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u8,
}

/// Transient particle burst spawned where a block was destroyed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// Burst of particles flung in random directions from `origin`
    pub fn spawn<R: Rng + ?Sized>(origin: Vec2, color: u8, rng: &mut R) -> Self {
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|_| {
                let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
                let speed: f32 = rng.random_range(0.5..2.0);
                Particle {
                    pos: origin,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    color,
                }
            })
            .collect();

        Self {
            origin,
            life: EXPLOSION_LIFE,
            particles,
        }
    }

    pub fn advance(&mut self) {
        self.life = self.life.saturating_sub(1);
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Exponentially decaying camera shake
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
}

impl ScreenShake {
    /// Raise intensity to at least `amount` (never lowers it)
    pub fn trigger(&mut self, amount: f32) {
        self.intensity = self.intensity.max(amount);
    }

    pub fn decay(&mut self) {
        if self.intensity > 0.0 {
            self.intensity *= SHAKE_DECAY;
            if self.intensity < SHAKE_CUTOFF {
                self.intensity = 0.0;
            }
        }
    }

    /// Camera offset for one rendered frame
    ///
    /// Takes the renderer's own RNG so headless runs and simulation RNG state
    /// are unaffected by drawing.
    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        if self.intensity <= 0.0 {
            return Vec2::ZERO;
        }
        let i = self.intensity;
        Vec2::new(rng.random_range(-i..=i), rng.random_range(-i..=i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_spawns_eight_particles_at_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let origin = Vec2::new(105.0, 80.0);
        let exp = Explosion::spawn(origin, 5, &mut rng);

        assert_eq!(exp.particles.len(), 8);
        assert_eq!(exp.life, EXPLOSION_LIFE);
        for p in &exp.particles {
            assert_eq!(p.pos, origin);
            assert_eq!(p.color, 5);
            let speed = p.vel.length();
            assert!((0.5 - 1e-4..2.0 + 1e-4).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn test_explosion_particles_fall() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut exp = Explosion::spawn(Vec2::ZERO, 7, &mut rng);
        let vy_before: Vec<f32> = exp.particles.iter().map(|p| p.vel.y).collect();

        exp.advance();
        for (p, vy) in exp.particles.iter().zip(vy_before) {
            assert!((p.vel.y - (vy + PARTICLE_GRAVITY)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_explosion_expires_after_life() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut exp = Explosion::spawn(Vec2::ZERO, 7, &mut rng);
        for _ in 0..EXPLOSION_LIFE - 1 {
            exp.advance();
            assert!(exp.is_alive());
        }
        exp.advance();
        assert!(!exp.is_alive());
    }

    #[test]
    fn test_shake_takes_max() {
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_HIT);
        shake.trigger(SHAKE_LASER);
        assert_eq!(shake.intensity, SHAKE_HIT);
        shake.trigger(SHAKE_BLAST);
        assert_eq!(shake.intensity, SHAKE_BLAST);
    }

    #[test]
    fn test_shake_decays_and_snaps_to_zero() {
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_HIT);
        shake.decay();
        assert!((shake.intensity - 1.8).abs() < 1e-6);

        for _ in 0..100 {
            shake.decay();
        }
        assert_eq!(shake.intensity, 0.0);
    }

    #[test]
    fn test_shake_offset_bounded() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut shake = ScreenShake::default();
        assert_eq!(shake.offset(&mut rng), Vec2::ZERO);

        shake.trigger(SHAKE_BLAST);
        for _ in 0..50 {
            let o = shake.offset(&mut rng);
            assert!(o.x.abs() <= SHAKE_BLAST && o.y.abs() <= SHAKE_BLAST);
        }
    }
}
