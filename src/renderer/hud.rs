//! Heads-up display and screen overlays
//!
//! Drawn after the camera is restored so it never shakes.

use glam::Vec2;

use crate::consts::TICKS_PER_SECOND;
use crate::palette;
use crate::platform::{Canvas, Primitive};
use crate::sim::{GamePhase, GameState};

/// One line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub pos: Vec2,
    pub text: String,
    pub color: u8,
}

impl HudLine {
    fn new(x: f32, y: f32, text: String, color: u8) -> Self {
        Self {
            pos: Vec2::new(x, y),
            text,
            color,
        }
    }
}

fn seconds(ticks: u32) -> u32 {
    ticks / TICKS_PER_SECOND
}

/// HUD lines for the current state, in draw order
pub fn lines(state: &GameState) -> Vec<HudLine> {
    let w = state.playfield.width;
    let h = state.playfield.height;
    let mut out = vec![
        HudLine::new(5.0, 5.0, format!("SCORE: {}", state.score), palette::WHITE),
        HudLine::new(5.0, 15.0, format!("BALLS: {}", state.shots_left), palette::WHITE),
        HudLine::new(5.0, 25.0, format!("STAGE: {}", state.stage + 1), palette::WHITE),
    ];

    if state.combo.count > 0 {
        out.push(HudLine::new(5.0, 35.0, format!("COMBO: {}", state.combo.count), palette::RED));
    }

    let p = &state.powerups;
    if p.multi_ball() {
        let text = format!("MULTI-BALL: {}", seconds(p.multi_ball_ticks));
        out.push(HudLine::new(5.0, 45.0, text, palette::LIME));
    }
    if p.big_ball() {
        let text = format!("BIG-BALL: {}", seconds(p.big_ball_ticks));
        out.push(HudLine::new(5.0, 55.0, text, palette::PINK));
    }
    if p.laser() {
        let text = format!("LASER: {}", seconds(p.laser_ticks));
        out.push(HudLine::new(5.0, 65.0, text, palette::RED));
    }

    if state.fever.active {
        let text = format!("FEVER MODE: {}", seconds(state.fever.ticks));
        out.push(HudLine::new(w / 2.0 - 20.0, 5.0, text, palette::RED));
    }
    if state.fantastic.is_showing() {
        out.push(HudLine::new(
            w / 2.0 - 30.0,
            h / 2.0 - 10.0,
            "FANTASTIC!!".into(),
            palette::YELLOW,
        ));
    }

    match state.phase {
        GamePhase::Lost => {
            out.push(HudLine::new(w / 2.0 - 20.0, h / 2.0 - 4.0, "GAME OVER".into(), palette::RED));
            out.push(HudLine::new(
                w / 2.0 - 45.0,
                h / 2.0 + 4.0,
                "Press ENTER to return to Title".into(),
                palette::WHITE,
            ));
        }
        GamePhase::Won => {
            out.push(HudLine::new(w / 2.0 - 25.0, h / 2.0 - 4.0, "STAGE CLEAR!".into(), palette::PINK));
            out.push(HudLine::new(
                w / 2.0 - 40.0,
                h / 2.0 + 4.0,
                "Press ENTER for next stage".into(),
                palette::WHITE,
            ));
        }
        GamePhase::Playing => {}
    }

    out
}

pub fn draw(canvas: &mut dyn Canvas, state: &GameState) {
    for line in lines(state) {
        canvas.draw(
            Primitive::Text {
                pos: line.pos,
                text: line.text,
            },
            line.color,
        );
    }
}
