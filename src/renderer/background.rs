//! Per-stage scenery

use glam::Vec2;
use rand::Rng;

use crate::palette;
use crate::platform::{Canvas, Primitive};
use crate::sim::Playfield;

/// Background theme for a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Grassland,
    Volcano,
    Ocean,
    Sky,
    Space,
    /// Plain sky for stages past the themed ones
    Default,
}

impl Background {
    pub fn for_stage(stage: u32) -> Self {
        match stage {
            0 => Background::Grassland,
            1 => Background::Volcano,
            2 => Background::Ocean,
            3 => Background::Sky,
            4 => Background::Space,
            _ => Background::Default,
        }
    }

    /// Color the screen is cleared to
    pub fn clear_color(self) -> u8 {
        match self {
            Background::Volcano | Background::Space => palette::BLACK,
            Background::Ocean => palette::LIGHT_BLUE,
            Background::Grassland | Background::Sky | Background::Default => palette::CYAN,
        }
    }

    fn ground_color(self) -> u8 {
        match self {
            Background::Sky | Background::Default => palette::GREEN,
            _ => palette::NAVY,
        }
    }

    /// Draw the scenery; `rng` jitters bubbles, clouds and stars
    pub fn draw<R: Rng + ?Sized>(self, canvas: &mut dyn Canvas, playfield: &Playfield, rng: &mut R) {
        let w = playfield.width;
        let ground = playfield.ground_y();
        canvas.draw(Primitive::Clear, self.clear_color());

        match self {
            Background::Grassland => {
                fill(canvas, 0.0, ground - 20.0, w, 20.0, palette::GREEN);
                let mut x = 0.0;
                while x < w {
                    canvas.draw(
                        Primitive::Triangle {
                            a: Vec2::new(x + 4.0, ground - 20.0),
                            b: Vec2::new(x, ground - 30.0),
                            c: Vec2::new(x + 8.0, ground - 30.0),
                        },
                        palette::GREEN,
                    );
                    x += 8.0;
                }
            }
            Background::Volcano => {
                let mid = w / 2.0;
                canvas.draw(
                    Primitive::Triangle {
                        a: Vec2::new(mid, ground),
                        b: Vec2::new(mid - 50.0, ground - 50.0),
                        c: Vec2::new(mid + 50.0, ground - 50.0),
                    },
                    palette::RED,
                );
                circle(canvas, Vec2::new(mid, ground - 50.0), 5.0, palette::YELLOW);
            }
            Background::Ocean => {
                fill(canvas, 0.0, ground - 10.0, w, 10.0, palette::CYAN);
                let mut x = 0.0;
                while x < w {
                    let jitter = Vec2::new(rng.random_range(-2..=2) as f32, rng.random_range(-2..=2) as f32);
                    circle(canvas, Vec2::new(x, ground - 5.0) + jitter, 2.0, palette::WHITE);
                    x += 10.0;
                }
            }
            Background::Sky => {
                let mut x = 0.0;
                while x < w {
                    for (y, r) in [(30.0, 10.0), (50.0, 8.0)] {
                        let jitter = Vec2::new(rng.random_range(-5..=5) as f32, rng.random_range(-5..=5) as f32);
                        circle(canvas, Vec2::new(x, y) + jitter, r, palette::WHITE);
                    }
                    x += 15.0;
                }
            }
            Background::Space => {
                for _ in 0..50 {
                    let pos = Vec2::new(
                        rng.random_range(0..=w as i32) as f32,
                        rng.random_range(0..=playfield.height as i32) as f32,
                    );
                    canvas.draw(Primitive::Pixel { pos }, palette::WHITE);
                }
                circle(canvas, Vec2::new(w - 20.0, 20.0), 10.0, palette::YELLOW);
            }
            Background::Default => {}
        }

        fill(canvas, 0.0, ground, w, playfield.height - ground, self.ground_color());
    }
}

fn fill(canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32, color: u8) {
    canvas.draw(
        Primitive::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            filled: true,
        },
        color,
    );
}

fn circle(canvas: &mut dyn Canvas, center: Vec2, radius: f32, color: u8) {
    canvas.draw(
        Primitive::Circle {
            center,
            radius,
            filled: true,
        },
        color,
    );
}
