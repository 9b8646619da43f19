//! The falling bucket: click it for health before it lands on the scoreboard.

use rand::Rng;

use crate::entities::{Entity, EntityKind, Outcome, RenderFlags, Viewport, UNSTAGED};
use crate::geometry::{random_coord, Axis, Rect};

pub const BUCKET_SIZE: f32 = 50.0;
pub const FALL_SPEED: f32 = 3.0;
pub const POWER: i32 = 25;

/// Build a live bucket at a random column, just above the top edge.
pub fn spawn(viewport: &Viewport, board_height: f32, rng: &mut impl Rng) -> Entity {
    let x = random_coord(rng, Axis::Width, viewport, board_height, 0.0);
    Entity {
        id: UNSTAGED,
        kind: EntityKind::Pickup,
        x,
        y: -BUCKET_SIZE,
        width: BUCKET_SIZE,
        height: BUCKET_SIZE,
        scale: 1.0,
        mirrored: false,
        direction: 0.0,
        health: 0,
        alive: true,
        ticks: 0,
        flags: RenderFlags::enabled(),
        blood: Vec::new(),
    }
}

pub fn bounds(pickup: &Entity) -> Rect {
    Rect::new(pickup.x, pickup.y, pickup.width, pickup.height)
}

pub fn pointer_down(pickup: &mut Entity, gx: f32, gy: f32) -> Outcome {
    if pickup.kind != EntityKind::Pickup || !pickup.flags.interactive {
        return Outcome::None;
    }
    if !bounds(pickup).contains(gx, gy) || !pickup.kill() {
        return Outcome::None;
    }
    Outcome::Collected { power: POWER }
}

/// Fall one step.  Expires on reaching `floor` (the scoreboard's top edge)
/// or once camera drift has pushed it fully out of view.
pub fn frame_tick(pickup: &mut Entity, viewport: &Viewport, floor: f32) -> Outcome {
    if pickup.kind != EntityKind::Pickup || !pickup.alive || !pickup.flags.animating {
        return Outcome::None;
    }

    pickup.y += FALL_SPEED;
    let landed = pickup.y + pickup.height >= floor;
    let drifted = pickup.x + pickup.width < 0.0 || pickup.x > viewport.width;
    if landed || drifted {
        pickup.kill();
        return Outcome::Expired;
    }
    Outcome::None
}
