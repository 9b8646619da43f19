//! Shooter projectiles: a growing disc that hurts the player when its fuse
//! runs out inside the viewport, unless it is shot down first.

use tracing::debug;

use crate::entities::{Entity, EntityKind, Outcome, RenderFlags, Viewport, UNSTAGED};
use crate::geometry::{in_range, Circle};

pub const INITIAL_SCALE: f32 = 0.05;
pub const SCALE_STEP: f32 = 0.1;
/// Ticks until the projectile resolves.
pub const FUSE: u32 = 20;
pub const DAMAGE: i32 = 10;

/// Build a live projectile centred on (`x`, `y`).
pub fn spawn(x: f32, y: f32) -> Entity {
    Entity {
        id: UNSTAGED,
        kind: EntityKind::Projectile,
        x,
        y,
        width: 0.0,
        height: 0.0,
        scale: INITIAL_SCALE,
        mirrored: false,
        direction: 0.0,
        health: 0,
        alive: true,
        ticks: 0,
        flags: RenderFlags::enabled(),
        blood: Vec::new(),
    }
}

/// The disc texture has a radius of half the viewport width at scale 1.
pub fn radius(projectile: &Entity, viewport: &Viewport) -> f32 {
    viewport.width / 2.0 * projectile.scale
}

pub fn contains(projectile: &Entity, viewport: &Viewport, gx: f32, gy: f32) -> bool {
    Circle::new(projectile.x, projectile.y, radius(projectile, viewport)).contains(gx, gy)
}

/// Shooting a projectile down removes it with no economic effect.
pub fn pointer_down(projectile: &mut Entity) -> Outcome {
    if projectile.kind != EntityKind::Projectile || !projectile.flags.interactive {
        return Outcome::None;
    }
    if !projectile.kill() {
        return Outcome::None;
    }
    debug!(id = projectile.id, ticks = projectile.ticks, "projectile shot down");
    Outcome::Defused
}

pub fn frame_tick(projectile: &mut Entity, viewport: &Viewport) -> Outcome {
    if projectile.kind != EntityKind::Projectile
        || !projectile.alive
        || !projectile.flags.animating
    {
        return Outcome::None;
    }

    projectile.ticks += 1;
    projectile.scale += SCALE_STEP;
    if projectile.ticks < FUSE {
        return Outcome::None;
    }

    let landed = in_range(projectile.x, 0.0, viewport.width);
    projectile.kill();
    if landed {
        Outcome::Impact { damage: DAMAGE }
    } else {
        Outcome::Fizzled
    }
}
