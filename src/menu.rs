//! Clickable buttons for each screen and where they sit.

use crate::entities::{Level, Overlay, Screen, Viewport};
use crate::geometry::Rect;
use crate::stage::Stage;
use crate::store::Scoreboard;

/// Frames a pressed button stays pressed before its action runs
/// (about 200 ms at 30 fps).
pub const PRESS_SETTLE_FRAMES: u32 = 6;

const BUTTON_W: f32 = 80.0;
const BUTTON_H: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Start,
    Play(Level),
    Pause,
    Sound,
    Resume,
    Exit,
    Retry,
    Levels,
}

impl Button {
    /// Sound toggles on the spot; everything else settles first.
    pub fn is_deferred(self) -> bool {
        !matches!(self, Button::Sound)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonSpot {
    pub button: Button,
    pub rect: Rect,
    pub label: String,
}

fn spot(button: Button, x: f32, y: f32, label: impl Into<String>) -> ButtonSpot {
    ButtonSpot {
        button,
        rect: Rect::new(x, y, BUTTON_W, BUTTON_H),
        label: label.into(),
    }
}

/// Buttons currently on screen, topmost last.
pub fn layout(stage: &Stage, board: &Scoreboard, vp: &Viewport) -> Vec<ButtonSpot> {
    let cx = vp.width / 2.0 - BUTTON_W / 2.0;
    let cy = vp.height / 2.0;
    let mut spots = Vec::new();

    match stage.screen() {
        Some(Screen::Start) => {
            spots.push(spot(Button::Start, cx, cy + 60.0, "START"));
        }
        Some(Screen::Levels) => {
            for (i, level) in Level::ALL.iter().enumerate() {
                let x = vp.width * (i as f32 + 1.0) / 3.0 - BUTTON_W / 2.0;
                spots.push(spot(Button::Play(*level), x, cy, format!("PLAY {}", level.number())));
            }
        }
        Some(Screen::Map) => {
            let row = board.top(vp.height) + 10.0;
            if board.pause_enabled {
                spots.push(spot(Button::Pause, vp.width - 2.0 * BUTTON_W - 20.0, row, "PAUSE"));
            }
            let sound = if board.sound_on { "OFF" } else { "ON" };
            spots.push(spot(Button::Sound, vp.width - BUTTON_W - 10.0, row, sound));
        }
        Some(Screen::End(_)) => {
            spots.push(spot(Button::Retry, cx - BUTTON_W / 2.0 - 10.0, cy + 40.0, "RETRY"));
            spots.push(spot(Button::Levels, cx + BUTTON_W / 2.0 + 10.0, cy + 40.0, "LEVELS"));
        }
        None => {}
    }

    if stage.has_overlay(Overlay::Pause) {
        spots.push(spot(Button::Resume, cx, cy + 40.0, "PLAY"));
        spots.push(spot(Button::Exit, vp.width - BUTTON_W - 10.0, 10.0, "EXIT"));
    }
    spots
}
