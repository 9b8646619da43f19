//! Game context and event dispatch.
//!
//! `Game` owns everything the entities touch: the store, the scoreboard, the
//! stage, the camera and the RNG.  Input and frame events come in through
//! `pointer_down`, `pointer_up`, `key` and `frame`; entity handlers report an
//! `Outcome` and `apply` turns it into economy and stage changes, once.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::camera::{Camera, Nudge};
use crate::entities::{
    EndReport, Entity, EntityId, Level, Outcome, Overlay, Screen, StageItem, Tag, Tier, Viewport,
};
use crate::menu::{self, Button, ButtonSpot, PRESS_SETTLE_FRAMES};
use crate::name_store::NameStore;
use crate::stage::Stage;
use crate::store::{Scoreboard, Store};
use crate::{pickup, projectile, target};

const MAX_NAME_LEN: usize = 16;

/// Keys the game understands, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Enter,
    Backspace,
    Esc,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Deferred {
    frames_left: u32,
    button: Button,
}

pub struct Game {
    pub viewport: Viewport,
    pub store: Store,
    pub board: Scoreboard,
    pub stage: Stage,
    pub camera: Camera,
    /// Name being typed on the start screen.
    pub name_input: String,
    /// Button drawn pressed while its action settles.
    pub pressed: Option<Button>,
    /// Ticks since the current level started (paused frames excluded).
    pub level_ticks: u32,
    /// Targets spawned so far in the current level.
    pub spawned: u32,
    pub frame: u64,
    deferred: Vec<Deferred>,
    rng: StdRng,
    names: Box<dyn NameStore>,
}

impl Game {
    pub fn new(viewport: Viewport, seed: Option<u64>, names: Box<dyn NameStore>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = Store::default();
        let board = Scoreboard::new(&store);
        let mut stage = Stage::new();
        stage.add(StageItem::Screen(Screen::Start));
        Self {
            viewport,
            name_input: names.get(),
            store,
            board,
            stage,
            camera: Camera::new(),
            pressed: None,
            level_ticks: 0,
            spawned: 0,
            frame: 0,
            deferred: Vec::new(),
            rng,
            names,
        }
    }

    // ── State queries ────────────────────────────────────────────────────────

    pub fn screen(&self) -> Option<Screen> {
        self.stage.screen()
    }

    pub fn is_paused(&self) -> bool {
        self.stage.has_overlay(Overlay::Pause)
    }

    /// On the map with the pause overlay down.
    pub fn is_running(&self) -> bool {
        self.screen() == Some(Screen::Map) && !self.is_paused()
    }

    pub fn buttons(&self) -> Vec<ButtonSpot> {
        menu::layout(&self.stage, &self.board, &self.viewport)
    }

    fn button_at(&self, x: f32, y: f32) -> Option<Button> {
        self.buttons()
            .into_iter()
            .rev()
            .find(|spot| spot.rect.contains(x, y))
            .map(|spot| spot.button)
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    /// Stage an entity beneath the scoreboard.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.stage.insert_below_scoreboard(entity)
    }

    pub fn spawn_target(&mut self, tier: Tier) -> EntityId {
        let entity = target::spawn(tier, &self.viewport, self.board.height, &mut self.rng);
        self.spawned += 1;
        self.spawn(entity)
    }

    pub fn spawn_pickup(&mut self) -> EntityId {
        let entity = pickup::spawn(&self.viewport, self.board.height, &mut self.rng);
        self.spawn(entity)
    }

    // ── Screen transitions ───────────────────────────────────────────────────

    pub fn start_level(&mut self, level: Level) {
        self.store.begin_level(level);
        self.board.refresh(&self.store);
        self.board.pause_enabled = true;
        self.camera.reset();
        self.level_ticks = 0;
        self.spawned = 0;

        let mut items = vec![StageItem::Screen(Screen::Map)];
        for tier in level.roster() {
            let entity = target::spawn(*tier, &self.viewport, self.board.height, &mut self.rng);
            items.push(StageItem::Entity(entity));
            self.spawned += 1;
        }
        items.push(StageItem::Scoreboard);
        self.stage.clear_and_stage(items);
        info!(level = level.number(), player = %self.store.name, "level started");
    }

    fn end_level(&mut self, won: bool) {
        let Some(level) = self.store.level else {
            return;
        };
        let report = EndReport {
            level,
            won,
            score: self.store.score,
        };
        self.stage.clear_and_stage(vec![StageItem::Screen(Screen::End(report))]);
        info!(level = level.number(), won, score = report.score, "level over");
    }

    fn show_levels(&mut self) {
        self.board.pause_enabled = true;
        self.stage.clear_and_stage(vec![StageItem::Screen(Screen::Levels)]);
    }

    /// Ends the level once health runs out, or once the quota is spawned
    /// and every target is gone.
    fn check_level_end(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(level) = self.store.level else {
            return;
        };
        if self.store.is_dead() {
            self.end_level(false);
        } else if self.spawned >= level.quota() && self.stage.count(Tag::Target) == 0 {
            self.end_level(true);
        }
    }

    // ── Buttons ──────────────────────────────────────────────────────────────

    /// Press a button: draw it pressed and run its action after it settles.
    pub fn press(&mut self, button: Button) {
        if !button.is_deferred() {
            self.perform(button);
            return;
        }
        if self.deferred.iter().any(|d| d.button == button) {
            return;
        }
        self.pressed = Some(button);
        self.deferred.push(Deferred {
            frames_left: PRESS_SETTLE_FRAMES,
            button,
        });
    }

    fn run_deferred(&mut self) {
        let mut ready = Vec::new();
        self.deferred.retain_mut(|d| {
            d.frames_left = d.frames_left.saturating_sub(1);
            if d.frames_left == 0 {
                ready.push(d.button);
                false
            } else {
                true
            }
        });
        for button in ready {
            if self.pressed == Some(button) {
                self.pressed = None;
            }
            self.perform(button);
        }
    }

    /// Run a button's action if it still makes sense on the current screen.
    fn perform(&mut self, button: Button) {
        let screen = self.screen();
        let paused = self.is_paused();
        match (button, screen) {
            (Button::Start, Some(Screen::Start)) => {
                let name = self.name_input.trim().to_string();
                self.names.set(&name);
                self.store.name = name;
                self.stage.clear_and_stage(vec![StageItem::Screen(Screen::Levels)]);
            }
            (Button::Play(level), Some(Screen::Levels)) => self.start_level(level),
            (Button::Pause, Some(Screen::Map)) if !paused && self.board.pause_enabled => {
                self.stage.stop_and_stage(&mut self.board, vec![Overlay::Pause]);
            }
            (Button::Resume, Some(Screen::Map)) if paused => {
                self.stage.play_and_unstage(&mut self.board, &[Overlay::Pause]);
            }
            (Button::Exit, Some(Screen::Map)) if paused => self.show_levels(),
            (Button::Sound, Some(Screen::Map)) => self.board.toggle_sound(),
            (Button::Retry, Some(Screen::End(report))) => self.start_level(report.level),
            (Button::Levels, Some(Screen::End(_))) => self.show_levels(),
            _ => debug!(?button, ?screen, "stale button press ignored"),
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.camera.press(x);
        if let Some(button) = self.button_at(x, y) {
            self.press(button);
            return;
        }
        if !self.is_running() {
            return;
        }

        let vp = self.viewport;
        let hit = self.stage.topmost(|e| {
            e.flags.interactive
                && match e.tag() {
                    Tag::Target => target::contains(e, x, y),
                    Tag::Projectile => projectile::contains(e, &vp, x, y),
                    Tag::Pickup => pickup::bounds(e).contains(x, y),
                }
        });
        let Some(id) = hit else {
            return;
        };
        let Some(entity) = self.stage.entity_mut(id) else {
            return;
        };
        let outcome = match entity.tag() {
            Tag::Target => target::pointer_down(entity, x, y),
            Tag::Projectile => projectile::pointer_down(entity),
            Tag::Pickup => pickup::pointer_down(entity, x, y),
        };
        self.apply(id, outcome);
        self.check_level_end();
    }

    pub fn pointer_up(&mut self, x: f32, _y: f32) {
        if self.is_running() {
            self.camera.release(x, &mut self.stage);
        } else {
            self.camera.cancel_drag();
        }
    }

    pub fn key(&mut self, key: Key) -> Control {
        match self.screen() {
            Some(Screen::Start) => match key {
                Key::Esc => return Control::Quit,
                Key::Enter => self.press(Button::Start),
                Key::Backspace => {
                    self.name_input.pop();
                }
                Key::Char(c) if !c.is_control() && self.name_input.chars().count() < MAX_NAME_LEN => {
                    self.name_input.push(c);
                }
                _ => {}
            },
            Some(Screen::Levels) => match key {
                Key::Esc | Key::Char('q') => return Control::Quit,
                Key::Char(c) => {
                    let level = c.to_digit(10).and_then(|n| Level::from_number(n as u8));
                    if let Some(level) = level {
                        self.press(Button::Play(level));
                    }
                }
                _ => {}
            },
            Some(Screen::Map) if self.is_paused() => match key {
                Key::Esc | Key::Char('p') | Key::Char('P') => self.press(Button::Resume),
                Key::Char('x') | Key::Char('X') => self.press(Button::Exit),
                _ => {}
            },
            Some(Screen::Map) => match key {
                Key::Left | Key::Char('a') | Key::Char('A') => {
                    self.camera.nudge(Nudge::Left, &mut self.stage);
                }
                Key::Right | Key::Char('d') | Key::Char('D') => {
                    self.camera.nudge(Nudge::Right, &mut self.stage);
                }
                Key::Esc | Key::Char('p') | Key::Char('P') => self.press(Button::Pause),
                Key::Char('m') | Key::Char('M') => self.press(Button::Sound),
                _ => {}
            },
            Some(Screen::End(_)) => match key {
                Key::Esc | Key::Char('q') | Key::Char('Q') => return Control::Quit,
                Key::Char('r') | Key::Char('R') | Key::Enter => self.press(Button::Retry),
                Key::Char('l') | Key::Char('L') => self.press(Button::Levels),
                _ => {}
            },
            None => {}
        }
        Control::Continue
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Advance one rendered frame.
    pub fn frame(&mut self) {
        self.frame += 1;
        self.run_deferred();
        if !self.is_running() {
            return;
        }

        self.level_ticks += 1;
        self.periodic_spawns();

        let vp = self.viewport;
        let floor = self.board.top(vp.height);
        for id in self.stage.tracked_ids() {
            let Some(entity) = self.stage.entity_mut(id) else {
                continue;
            };
            let outcome = match entity.tag() {
                Tag::Target => target::frame_tick(entity, &vp),
                Tag::Projectile => projectile::frame_tick(entity, &vp),
                Tag::Pickup => pickup::frame_tick(entity, &vp, floor),
            };
            self.apply(id, outcome);
        }
        self.check_level_end();
    }

    fn periodic_spawns(&mut self) {
        let Some(level) = self.store.level else {
            return;
        };
        if self.level_ticks % level.spawn_interval() == 0 && self.spawned < level.quota() {
            if let Some(tier) = Tier::DRIFTERS.choose(&mut self.rng).copied() {
                self.spawn_target(tier);
            }
        }
        if self.level_ticks % level.pickup_interval() == 0 {
            self.spawn_pickup();
        }
    }

    // ── Outcomes ─────────────────────────────────────────────────────────────

    /// Apply what a handler reported for entity `id`.
    pub fn apply(&mut self, id: EntityId, outcome: Outcome) {
        match outcome {
            Outcome::None | Outcome::Wounded => {}
            Outcome::Fire { x, y } => {
                let shot = self.spawn(projectile::spawn(x, y));
                debug!(shooter = id, projectile = shot, "shooter fired");
            }
            Outcome::Killed { reward } => {
                self.store.add_score(reward);
                self.board.refresh(&self.store);
                info!(id, reward, score = self.store.score, "target killed");
            }
            Outcome::Impact { damage } => {
                self.store.damage(damage);
                self.board.refresh(&self.store);
                info!(id, damage, health = self.store.health, "projectile hit");
            }
            Outcome::Collected { power } => {
                self.store.heal(power);
                self.board.refresh(&self.store);
                info!(id, power, health = self.store.health, "bucket collected");
            }
            Outcome::Escaped | Outcome::Fizzled | Outcome::Defused | Outcome::Expired => {
                debug!(id, ?outcome, "entity gone");
            }
        }
        if outcome.is_terminal() {
            self.release(id);
        }
    }

    fn release(&mut self, id: EntityId) {
        if let Some(entity) = self.stage.remove(id) {
            debug!(id, kind = ?entity.kind, "released");
        }
    }
}
