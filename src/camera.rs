//! Horizontal camera: drags and arrow keys scroll the two background layers
//! at different rates and move every tracked entity along with them.

use tracing::debug;

use crate::stage::Stage;

/// Drags shorter than this are treated as clicks.
pub const DRAG_DEADZONE: f32 = 5.0;
/// Scroll per key press.
pub const KEY_STEP: f32 = 4.0;
/// The far layer scrolls at this fraction of the near layer's rate.
pub const FAR_RATE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
}

/// Tile offsets of the map's background layers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parallax {
    pub far: f32,
    pub near: f32,
}

#[derive(Clone, Debug, Default)]
pub struct Camera {
    /// Cumulative horizontal translation.
    pub offset: f32,
    pub layers: Parallax,
    drag_start: Option<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn press(&mut self, x: f32) {
        self.drag_start = Some(x);
    }

    pub fn cancel_drag(&mut self) {
        self.drag_start = None;
    }

    /// Finish a drag.  Returns the delta applied, if the drag cleared the
    /// deadzone.
    pub fn release(&mut self, x: f32, stage: &mut Stage) -> Option<f32> {
        let start = self.drag_start.take()?;
        let delta = x - start;
        if delta.abs() <= DRAG_DEADZONE {
            return None;
        }
        self.apply(delta, stage);
        Some(delta)
    }

    /// Left scrolls the world to the right and vice versa.
    pub fn nudge(&mut self, dir: Nudge, stage: &mut Stage) -> f32 {
        let delta = match dir {
            Nudge::Left => KEY_STEP,
            Nudge::Right => -KEY_STEP,
        };
        self.apply(delta, stage);
        delta
    }

    fn apply(&mut self, delta: f32, stage: &mut Stage) {
        self.offset += delta;
        self.layers.far += delta * FAR_RATE;
        self.layers.near += delta;
        stage.shift_tracked(delta);
        debug!(delta, offset = self.offset, "camera moved");
    }
}
