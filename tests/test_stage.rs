use chicken_chop::camera::{Camera, Nudge};
use chicken_chop::entities::*;
use chicken_chop::stage::Stage;
use chicken_chop::store::{Scoreboard, Store, BOARD_HEIGHT};
use chicken_chop::{pickup, projectile, target};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0)
}

/// Map, a target of every tier, a bucket and a projectile, then the scoreboard.
fn busy_stage() -> Stage {
    let mut rng = StdRng::seed_from_u64(3);
    let mut stage = Stage::new();
    stage.add(StageItem::Screen(Screen::Map));
    for tier in [Tier::Light, Tier::Medium, Tier::Heavy, Tier::Shooter] {
        stage.add(StageItem::Entity(target::spawn(tier, &vp(), BOARD_HEIGHT, &mut rng)));
    }
    stage.add(StageItem::Entity(pickup::spawn(&vp(), BOARD_HEIGHT, &mut rng)));
    stage.add(StageItem::Entity(projectile::spawn(10.0, 10.0)));
    stage.add(StageItem::Scoreboard);
    stage
}

#[test]
fn admitted_entities_get_distinct_ids() {
    let stage = busy_stage();
    let ids = stage.tracked_ids();
    assert_eq!(ids.len(), 6);
    assert!(!ids.contains(&UNSTAGED));
    let mut sorted = ids.clone();
    sorted.dedup();
    assert_eq!(sorted, ids);
}

#[test]
fn count_by_tag() {
    let stage = busy_stage();
    assert_eq!(stage.count(Tag::Target), 4);
    assert_eq!(stage.count(Tag::Pickup), 1);
    assert_eq!(stage.count(Tag::Projectile), 1);
}

#[test]
fn insert_below_scoreboard_keeps_board_on_top() {
    let mut stage = busy_stage();
    let id = stage.insert_below_scoreboard(projectile::spawn(1.0, 1.0));
    let items = stage.items();
    assert_eq!(items.last(), Some(&StageItem::Scoreboard));
    assert!(matches!(&items[items.len() - 2], StageItem::Entity(e) if e.id == id));
}

#[test]
fn insert_without_scoreboard_appends() {
    let mut stage = Stage::new();
    stage.add(StageItem::Screen(Screen::Map));
    let id = stage.insert_below_scoreboard(projectile::spawn(1.0, 1.0));
    assert_eq!(stage.topmost(|_| true), Some(id));
}

#[test]
fn remove_hands_back_the_entity_once() {
    let mut stage = busy_stage();
    let id = stage.tracked_ids()[0];
    assert_eq!(stage.remove(id).map(|e| e.id), Some(id));
    assert!(stage.remove(id).is_none());
    assert_eq!(stage.tracked().count(), 5);
}

#[test]
fn clear_and_stage_releases_everything() {
    let mut stage = busy_stage();
    let released = stage.clear_and_stage(vec![StageItem::Screen(Screen::Levels)]);
    assert_eq!(released, 6);
    assert_eq!(stage.tracked().count(), 0);
    assert_eq!(stage.items(), &[StageItem::Screen(Screen::Levels)]);
    assert_eq!(stage.screen(), Some(Screen::Levels));
}

#[test]
fn clear_and_stage_on_empty_stage() {
    let mut stage = Stage::new();
    assert_eq!(stage.clear_and_stage(vec![StageItem::Screen(Screen::Start)]), 0);
    assert!(stage.has_screen(Screen::Start));
}

#[test]
fn stop_then_play_restores_flags() {
    let mut stage = busy_stage();
    let store = Store::default();
    let mut board = Scoreboard::new(&store);

    // One entity already hidden before the pause
    let hidden = stage.tracked_ids()[1];
    if let Some(e) = stage.entity_mut(hidden) {
        e.flags.visible = false;
        e.flags.interactive = false;
    }
    let before: Vec<_> = stage.tracked().map(|e| (e.id, e.flags)).collect();

    stage.stop_and_stage(&mut board, vec![Overlay::Pause]);
    assert!(!board.pause_enabled);
    assert!(stage.has_overlay(Overlay::Pause));
    assert_eq!(stage.items().last(), Some(&StageItem::Overlay(Overlay::Pause)));
    for e in stage.tracked() {
        assert!(!e.flags.animating);
        assert!(!e.flags.interactive);
    }

    stage.play_and_unstage(&mut board, &[Overlay::Pause]);
    assert!(board.pause_enabled);
    assert!(!stage.has_overlay(Overlay::Pause));
    let after: Vec<_> = stage.tracked().map(|e| (e.id, e.flags)).collect();
    assert_eq!(after, before);
}

#[test]
fn entity_staged_during_pause_wakes_on_play() {
    let mut stage = busy_stage();
    let mut board = Scoreboard::new(&Store::default());
    stage.stop_and_stage(&mut board, vec![Overlay::Pause]);
    let late = stage.insert_below_scoreboard(projectile::spawn(5.0, 5.0));
    if let Some(e) = stage.entity_mut(late) {
        e.flags.animating = false;
    }
    stage.play_and_unstage(&mut board, &[Overlay::Pause]);
    assert_eq!(stage.entity(late).map(|e| e.flags.animating), Some(true));
}

#[test]
fn shift_skips_hidden_entities() {
    let mut stage = busy_stage();
    let ids = stage.tracked_ids();
    if let Some(e) = stage.entity_mut(ids[0]) {
        e.flags.visible = false;
    }
    let xs: Vec<_> = stage.tracked().map(|e| e.x).collect();
    stage.shift_tracked(-10.0);
    let shifted: Vec<_> = stage.tracked().map(|e| e.x).collect();
    assert_eq!(shifted[0], xs[0]);
    for (after, before) in shifted.iter().zip(&xs).skip(1) {
        assert_eq!(*after, before - 10.0);
    }
}

// ── Camera ────────────────────────────────────────────────────────────────────

#[test]
fn drag_moves_layers_at_their_rates() {
    let mut stage = busy_stage();
    let mut camera = Camera::new();
    camera.press(300.0);
    assert_eq!(camera.release(250.0, &mut stage), Some(-50.0));
    assert_eq!(camera.offset, -50.0);
    assert_eq!(camera.layers.near, -50.0);
    assert_eq!(camera.layers.far, -25.0);
}

#[test]
fn drag_within_deadzone_is_ignored() {
    let mut stage = busy_stage();
    let xs: Vec<_> = stage.tracked().map(|e| e.x).collect();
    let mut camera = Camera::new();
    camera.press(300.0);
    assert_eq!(camera.release(305.0, &mut stage), None);
    assert_eq!(stage.tracked().map(|e| e.x).collect::<Vec<_>>(), xs);
}

#[test]
fn release_without_press_is_ignored() {
    let mut stage = busy_stage();
    let mut camera = Camera::new();
    assert_eq!(camera.release(100.0, &mut stage), None);
    camera.press(0.0);
    camera.cancel_drag();
    assert_eq!(camera.release(100.0, &mut stage), None);
}

#[test]
fn nudges_step_four_units() {
    let mut stage = busy_stage();
    let mut camera = Camera::new();
    assert_eq!(camera.nudge(Nudge::Left, &mut stage), 4.0);
    assert_eq!(camera.layers.far, 2.0);
    assert_eq!(camera.nudge(Nudge::Right, &mut stage), -4.0);
    assert_eq!(camera.nudge(Nudge::Right, &mut stage), -4.0);
    assert_eq!(camera.layers.near, -4.0);
    assert_eq!(camera.layers.far, -2.0);
}
