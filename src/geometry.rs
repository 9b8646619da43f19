//! Bounded random placement and hit-region tests.

use rand::Rng;

use crate::entities::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Random integer coordinate along `axis`, both ends inclusive.
///
/// Widths span the whole viewport.  Heights stop at the scoreboard strip and
/// leave another `offset_bottom` units free so a sprite of that height still
/// fits above the strip.
pub fn random_coord(
    rng: &mut impl Rng,
    axis: Axis,
    viewport: &Viewport,
    board_height: f32,
    offset_bottom: f32,
) -> f32 {
    let max = match axis {
        Axis::Width => viewport.width,
        Axis::Height => viewport.height - board_height - offset_bottom,
    };
    random_in_range(rng, 0, max.floor() as i32) as f32
}

/// Random integer in `min..=max`.  A collapsed range (min > max, which a
/// very short viewport produces) yields `max`.
pub fn random_in_range(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if min >= max {
        return max;
    }
    rng.gen_range(min..=max)
}

/// Is `x` in `min..=max`?
pub fn in_range(x: f32, min: f32, max: f32) -> bool {
    x >= min && x <= max
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        if self.radius <= 0.0 {
            return false;
        }
        let dx = px - self.x;
        let dy = py - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}
