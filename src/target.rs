//! Target behaviour shared by every tier: spawn, pointer hits, frame ticks.

use rand::Rng;
use tracing::debug;

use crate::entities::{
    BloodMarker, Entity, EntityKind, Movement, Outcome, RenderFlags, Tier, Viewport, UNSTAGED,
};
use crate::geometry::{in_range, random_coord, random_in_range, Axis, Circle};

pub const TARGET_SIZE: f32 = 100.0;
pub const HIT_RADIUS: f32 = 25.0;
pub const HIT_DAMAGE: i32 = 5;
pub const DRIFT_SPEED: f32 = 4.0;
/// Ticks between two shooter projectiles.
pub const FIRE_INTERVAL: u32 = 20;
/// Shooters spawn no higher than this fraction of the viewport height.
const SHOOTER_BAND: f32 = 0.8;

/// Build a live target of `tier` at a random spot above the scoreboard.
pub fn spawn(tier: Tier, viewport: &Viewport, board_height: f32, rng: &mut impl Rng) -> Entity {
    let x = random_coord(rng, Axis::Width, viewport, board_height, 0.0);
    let (y, direction) = match tier.movement() {
        Movement::Drift => {
            let y = random_coord(rng, Axis::Height, viewport, board_height, TARGET_SIZE);
            let direction = if rng.gen_bool(0.5) { -DRIFT_SPEED } else { DRIFT_SPEED };
            (y, direction)
        }
        Movement::Stationary => {
            let low = (viewport.height * SHOOTER_BAND).ceil() as i32;
            let high = (viewport.height - board_height - TARGET_SIZE).ceil() as i32;
            (random_in_range(rng, low, high) as f32, 0.0)
        }
    };

    Entity {
        id: UNSTAGED,
        kind: EntityKind::Target(tier),
        x,
        y,
        width: TARGET_SIZE,
        height: TARGET_SIZE,
        scale: 1.0,
        mirrored: direction > 0.0,
        direction,
        health: tier.max_health(),
        alive: true,
        ticks: 0,
        flags: RenderFlags::enabled(),
        blood: Vec::new(),
    }
}

/// Convert a world point into the target's local box coordinates.
///
/// Mirrored drifters extend leftwards from `x`; the shooter's pivot sits at
/// the centre of its box.
pub fn to_local(target: &Entity, gx: f32, gy: f32) -> (f32, f32) {
    let (mut lx, mut ly) = if target.mirrored {
        (target.x - gx, gy - target.y)
    } else {
        (gx - target.x, gy - target.y)
    };
    if target.tier() == Some(Tier::Shooter) {
        lx += target.width / 2.0;
        ly += target.height / 2.0;
    }
    (lx, ly)
}

/// Inverse of `to_local`.
pub fn to_world(target: &Entity, lx: f32, ly: f32) -> (f32, f32) {
    let (lx, ly) = if target.tier() == Some(Tier::Shooter) {
        (lx - target.width / 2.0, ly - target.height / 2.0)
    } else {
        (lx, ly)
    };
    if target.mirrored {
        (target.x - lx, target.y + ly)
    } else {
        (target.x + lx, target.y + ly)
    }
}

/// World position of the hit circle's centre.
pub fn center(target: &Entity) -> (f32, f32) {
    let hit = hit_area(target);
    to_world(target, hit.x, hit.y)
}

/// The circular hit region, in local coordinates.
pub fn hit_area(target: &Entity) -> Circle {
    Circle::new(target.width / 2.0, target.height / 2.0, HIT_RADIUS)
}

pub fn contains(target: &Entity, gx: f32, gy: f32) -> bool {
    let (lx, ly) = to_local(target, gx, gy);
    hit_area(target).contains(lx, ly)
}

/// Apply one pointer press at world point (`gx`, `gy`).
pub fn pointer_down(target: &mut Entity, gx: f32, gy: f32) -> Outcome {
    let Some(tier) = target.tier() else {
        return Outcome::None;
    };
    if !target.alive || !target.flags.interactive {
        return Outcome::None;
    }
    let (lx, ly) = to_local(target, gx, gy);
    if !hit_area(target).contains(lx, ly) {
        return Outcome::None;
    }

    target.health -= HIT_DAMAGE;
    target.blood.push(BloodMarker { x: lx, y: ly, visible: false });
    if let Some(marker) = target.blood.last_mut() {
        marker.visible = true;
    }

    if target.health > 0 {
        debug!(id = target.id, ?tier, health = target.health, "target hit");
        return Outcome::Wounded;
    }
    target.health = 0;
    target.kill();
    Outcome::Killed { reward: tier.reward() }
}

/// Advance the target by one tick.
pub fn frame_tick(target: &mut Entity, viewport: &Viewport) -> Outcome {
    let Some(tier) = target.tier() else {
        return Outcome::None;
    };
    if !target.alive || !target.flags.animating {
        return Outcome::None;
    }

    match tier.movement() {
        Movement::Drift => {
            target.x += target.direction;
            let margin = 2.0 * target.width;
            if target.x < -margin || target.x > viewport.width + margin {
                target.kill();
                return Outcome::Escaped;
            }
            Outcome::None
        }
        Movement::Stationary => {
            target.ticks += 1;
            if target.ticks % FIRE_INTERVAL == 0 && in_range(target.x, 0.0, viewport.width) {
                return Outcome::Fire { x: target.x, y: target.y };
            }
            Outcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn mirrored_box_extends_left() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = spawn(Tier::Light, &Viewport::new(800.0, 600.0), 40.0, &mut rng);
        t.x = 300.0;
        t.y = 100.0;
        t.mirrored = true;
        assert!(contains(&t, 250.0, 150.0));
        assert!(!contains(&t, 350.0, 150.0));
    }

    #[test]
    fn shooter_hit_centre_is_its_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = spawn(Tier::Shooter, &Viewport::new(800.0, 600.0), 40.0, &mut rng);
        t.x = 300.0;
        t.y = 400.0;
        assert_eq!(to_local(&t, 300.0, 400.0), (50.0, 50.0));
    }
}
