//! Rendering module
//!
//! Reads the game state and emits palette-indexed primitives through a
//! [`Canvas`]. The world is drawn through a camera shifted by the screen
//! shake; the HUD is drawn unshifted on top.
//!
//! The renderer owns its own RNG for shake offsets and decorative jitter so
//! drawing never touches simulation state.

pub mod background;
pub mod hud;
pub mod shapes;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::palette;
use crate::platform::{Canvas, Primitive};
use crate::settings::Settings;
use crate::sim::GameState;

pub use background::Background;

/// Canvas adapter that offsets every primitive
struct Camera<'a> {
    inner: &'a mut dyn Canvas,
    offset: Vec2,
}

impl Canvas for Camera<'_> {
    fn draw(&mut self, primitive: Primitive, color: u8) {
        self.inner.draw(primitive.translated(self.offset), color);
    }
}

/// Draws game and title screens
#[derive(Debug, Clone)]
pub struct Renderer {
    rng: Pcg32,
    screen_shake: bool,
    particles: bool,
}

impl Renderer {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            screen_shake: settings.effective_screen_shake(),
            particles: settings.particles,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.screen_shake = settings.effective_screen_shake();
        self.particles = settings.particles;
    }

    /// Camera offset for this frame
    fn camera_offset(&mut self, state: &GameState) -> Vec2 {
        if self.screen_shake {
            state.shake.offset(&mut self.rng)
        } else {
            Vec2::ZERO
        }
    }

    /// Draw one in-game frame
    pub fn render_game(&mut self, state: &GameState, canvas: &mut dyn Canvas) {
        let offset = self.camera_offset(state);
        {
            let mut world = Camera {
                inner: &mut *canvas,
                offset,
            };

            Background::for_stage(state.stage).draw(&mut world, &state.playfield, &mut self.rng);

            shapes::launcher(&mut world, &state.launcher);
            for ball in state.balls.iter().filter(|b| b.active) {
                shapes::ball(&mut world, ball);
            }
            for block in state.blocks.iter().filter(|b| b.active) {
                shapes::block(&mut world, block, &mut self.rng);
            }
            if self.particles {
                for explosion in &state.explosions {
                    shapes::explosion(&mut world, explosion);
                }
            }
            for item in state.items.iter().filter(|i| i.active) {
                shapes::item(&mut world, item);
            }
            for laser in state.lasers.iter().filter(|l| l.active) {
                shapes::laser(&mut world, laser);
            }
        }

        hud::draw(canvas, state);
    }

    /// Draw the title screen; `frame` cycles the title color
    pub fn render_title(&mut self, best_score: u64, frame: u64, canvas: &mut dyn Canvas) {
        canvas.draw(Primitive::Clear, palette::NAVY);
        let title_color = (frame % palette::COUNT as u64) as u8;
        let lines = [
            (Vec2::new(80.0, 20.0), "DEMOLISHER".to_string(), title_color),
            (Vec2::new(55.0, 120.0), "Press Enter to Start".to_string(), palette::WHITE),
            (Vec2::new(5.0, 140.0), format!("HIGH SCORE: {}", best_score), palette::WHITE),
        ];
        for (pos, text, color) in lines {
            canvas.draw(Primitive::Text { pos, text }, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DrawList;
    use crate::sim::{Explosion, GamePhase};

    fn renderer(settings: &Settings) -> Renderer {
        Renderer::new(7, settings)
    }

    #[test]
    fn test_render_is_pure_read() {
        let mut state = GameState::new(11);
        state.shake.trigger(3.0);
        let before = serde_json::to_string(&state).unwrap();

        let mut list = DrawList::default();
        renderer(&Settings::default()).render_game(&state, &mut list);
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }

    #[test]
    fn test_fresh_frame_contents() {
        let state = GameState::new(11);
        let mut list = DrawList::default();
        renderer(&Settings::default()).render_game(&state, &mut list);

        assert_eq!(list.commands[0], (Primitive::Clear, palette::CYAN));
        assert!(list.contains_text("P:5"));
        assert!(list.contains_text("SCORE: 0"));
        assert!(list.contains_text("BALLS: 5"));
        assert!(!list.contains_text("GAME OVER"));
    }

    #[test]
    fn test_hud_not_shaken() {
        let mut state = GameState::new(11);
        state.shake.trigger(4.0);
        let mut list = DrawList::default();
        renderer(&Settings::default()).render_game(&state, &mut list);

        let score_pos = list.commands.iter().find_map(|(p, _)| match p {
            Primitive::Text { pos, text } if text.starts_with("SCORE") => Some(*pos),
            _ => None,
        });
        assert_eq!(score_pos, Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_world_offset_bounded_by_intensity() {
        let mut state = GameState::new(11);
        state.shake.trigger(2.0);
        let mut list = DrawList::default();
        renderer(&Settings::default()).render_game(&state, &mut list);

        // Ground strip is the last background primitive before the launcher
        let ground = list.commands.iter().find_map(|(p, _)| match p {
            Primitive::Rect { pos, size, .. } if size.x == 200.0 && size.y == 5.0 => Some(*pos),
            _ => None,
        });
        let pos = ground.unwrap();
        assert!(pos.x.abs() <= 2.0);
        assert!((pos.y - 145.0).abs() <= 2.0);
    }

    #[test]
    fn test_shake_disabled_by_reduced_motion() {
        let mut state = GameState::new(11);
        state.shake.trigger(4.0);
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut list = DrawList::default();
        renderer(&settings).render_game(&state, &mut list);

        let launcher_shadow = list.commands.iter().find_map(|(p, _)| match p {
            Primitive::Rect { pos, size, .. } if size.x == 12.0 && size.y == 5.0 => Some(*pos),
            _ => None,
        });
        assert_eq!(launcher_shadow, Some(Vec2::new(14.0, 140.0)));
    }

    #[test]
    fn test_particles_toggle() {
        let mut state = GameState::new(11);
        state.blocks.clear();
        let mut rng = Pcg32::seed_from_u64(1);
        state
            .explosions
            .push(Explosion::spawn(Vec2::new(150.0, 100.0), palette::PEACH, &mut rng));

        let count_peach = |list: &DrawList| {
            list.commands
                .iter()
                .filter(|(p, c)| matches!(p, Primitive::Pixel { .. }) && *c == palette::PEACH)
                .count()
        };

        let mut list = DrawList::default();
        renderer(&Settings::default()).render_game(&state, &mut list);
        assert_eq!(count_peach(&list), 8);

        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        list.clear();
        renderer(&settings).render_game(&state, &mut list);
        assert_eq!(count_peach(&list), 0);
    }

    #[test]
    fn test_overlay_for_lost_round() {
        let mut state = GameState::new(11);
        state.phase = GamePhase::Lost;
        let mut list = DrawList::default();
        renderer(&Settings::default()).render_game(&state, &mut list);
        assert!(list.contains_text("GAME OVER"));
        assert!(list.contains_text("Press ENTER to return to Title"));
    }

    #[test]
    fn test_title_shows_best_score() {
        let mut list = DrawList::default();
        renderer(&Settings::default()).render_title(4200, 3, &mut list);
        assert_eq!(list.commands[0], (Primitive::Clear, palette::NAVY));
        assert!(list.contains_text("HIGH SCORE: 4200"));
        assert!(list.contains_text("Press Enter to Start"));
    }
}
