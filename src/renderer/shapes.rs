//! Shape generation for game entities
//!
//! Each function emits the primitives for one entity in draw order.

use glam::Vec2;
use rand::Rng;

use crate::palette;
use crate::platform::{Canvas, Primitive};
use crate::sim::{Ball, BallKind, Block, BlockKind, Explosion, Item, ItemKind, Laser, Launcher};

/// Colors for game elements
pub mod colors {
    use crate::palette;

    pub const SHADOW: u8 = palette::NAVY;
    pub const HIGHLIGHT: u8 = palette::WHITE;
    pub const LAUNCHER_BODY: u8 = palette::GRAY;
    pub const BALL_NORMAL: u8 = palette::YELLOW;
    pub const BALL_BOMB: u8 = palette::RED;
    pub const BALL_PIERCE: u8 = palette::LIGHT_BLUE;
    pub const ITEM_MULTI_BALL: u8 = palette::LIME;
    pub const ITEM_BIG_BALL: u8 = palette::PINK;
    pub const ITEM_LASER: u8 = palette::RED;
    pub const LASER: u8 = palette::RED;
}

fn rect(canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32, color: u8) {
    canvas.draw(
        Primitive::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            filled: true,
        },
        color,
    );
}

fn outline(canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32, color: u8) {
    canvas.draw(
        Primitive::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            filled: false,
        },
        color,
    );
}

fn disc(canvas: &mut dyn Canvas, center: Vec2, radius: f32, color: u8) {
    canvas.draw(
        Primitive::Circle {
            center,
            radius,
            filled: true,
        },
        color,
    );
}

/// Launcher body, barrel scaled by power, and the power readout
pub fn launcher(canvas: &mut dyn Canvas, launcher: &Launcher) {
    let p = launcher.pos;
    let tip = p + crate::direction_from_degrees(launcher.angle) * (launcher.power * 3.0);
    let up = Vec2::new(0.0, -1.0);

    rect(canvas, p.x - 6.0, p.y, 12.0, 5.0, colors::SHADOW);
    rect(canvas, p.x - 5.0, p.y - 1.0, 10.0, 5.0, colors::LAUNCHER_BODY);
    canvas.draw(Primitive::Line { from: p, to: tip }, colors::SHADOW);
    canvas.draw(
        Primitive::Line {
            from: p + up,
            to: tip + up,
        },
        colors::HIGHLIGHT,
    );
    canvas.draw(
        Primitive::Text {
            pos: Vec2::new(p.x - 10.0, p.y - 12.0),
            text: format!("P:{}", launcher.power as i32),
        },
        palette::WHITE,
    );
}

pub fn ball_color(kind: BallKind) -> u8 {
    match kind {
        BallKind::Normal => colors::BALL_NORMAL,
        BallKind::Bomb => colors::BALL_BOMB,
        BallKind::Pierce => colors::BALL_PIERCE,
    }
}

/// Ball with drop shadow and a specular dot
pub fn ball(canvas: &mut dyn Canvas, ball: &Ball) {
    let lift = Vec2::new(0.0, -1.0);
    disc(canvas, ball.pos, ball.radius, colors::SHADOW);
    disc(canvas, ball.pos + lift, ball.radius, ball_color(ball.kind));
    disc(canvas, ball.pos + lift * 2.0, 1.0, colors::HIGHLIGHT);
}

/// Block with per-material 3D shading
///
/// Stone speckles come from `rng` so they shimmer frame to frame.
pub fn block<R: Rng + ?Sized>(canvas: &mut dyn Canvas, block: &Block, rng: &mut R) {
    let spec = block.spec();
    let (x, y, w, h) = (block.pos.x, block.pos.y, block.width, block.height);

    rect(canvas, x, y, w, h, spec.base_color);

    match block.kind {
        BlockKind::Wood | BlockKind::Stone => {
            rect(canvas, x, y, w, 1.0, spec.highlight_color);
            rect(canvas, x, y + h - 1.0, w, 1.0, spec.shadow_color);
            rect(canvas, x + w - 1.0, y, 1.0, h, spec.shadow_color);
            if block.kind == BlockKind::Stone {
                for _ in 0..5 {
                    let sx = rng.random_range(1..=(w as i32 - 2).max(1)) as f32;
                    let sy = rng.random_range(1..=(h as i32 - 2).max(1)) as f32;
                    canvas.draw(
                        Primitive::Pixel {
                            pos: Vec2::new(x + sx, y + sy),
                        },
                        spec.shadow_color,
                    );
                }
            }
        }
        BlockKind::Glass => {
            outline(canvas, x, y, w, h, spec.shadow_color);
            rect(canvas, x + 1.0, y + 1.0, w - 2.0, h - 2.0, spec.base_color);
            canvas.draw(
                Primitive::Pixel {
                    pos: Vec2::new(x + 1.0, y + 1.0),
                },
                spec.highlight_color,
            );
        }
        BlockKind::Fallback => outline(canvas, x, y, w, h, palette::BLACK),
    }
}

/// Explosion particles as single pixels
pub fn explosion(canvas: &mut dyn Canvas, explosion: &Explosion) {
    for particle in &explosion.particles {
        canvas.draw(Primitive::Pixel { pos: particle.pos }, particle.color);
    }
}

/// Falling item icon: circle, square or triangle by kind
pub fn item(canvas: &mut dyn Canvas, item: &Item) {
    let p = item.pos;
    match item.kind {
        ItemKind::MultiBall => disc(canvas, p, 4.0, colors::ITEM_MULTI_BALL),
        ItemKind::BigBall => rect(canvas, p.x - 2.0, p.y - 2.0, 5.0, 5.0, colors::ITEM_BIG_BALL),
        ItemKind::LaserBeam => canvas.draw(
            Primitive::Triangle {
                a: Vec2::new(p.x, p.y - 2.0),
                b: Vec2::new(p.x - 3.0, p.y + 2.0),
                c: Vec2::new(p.x + 3.0, p.y + 2.0),
            },
            colors::ITEM_LASER,
        ),
    }
}

pub fn laser(canvas: &mut dyn Canvas, laser: &Laser) {
    canvas.draw(
        Primitive::Line {
            from: laser.origin,
            to: laser.endpoint(),
        },
        colors::LASER,
    );
}
