//! Player economy and the scoreboard strip that displays it.

use crate::entities::Level;

pub const START_HEALTH: i32 = 100;

/// Height of the scoreboard strip at the bottom of the viewport.
pub const BOARD_HEIGHT: f32 = 40.0;

/// Single source of truth for name, level, score and health.
#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    pub name: String,
    pub level: Option<Level>,
    pub score: u32,
    pub health: i32,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: None,
            score: 0,
            health: START_HEALTH,
        }
    }
}

impl Store {
    pub fn begin_level(&mut self, level: Level) {
        self.level = Some(level);
        self.score = 0;
        self.health = START_HEALTH;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Health never drops below zero.
    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health += amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scoreboard {
    pub text: String,
    pub height: f32,
    /// The PAUSE control; switched off while the pause overlay is up.
    pub pause_enabled: bool,
    pub sound_on: bool,
}

impl Scoreboard {
    pub fn new(store: &Store) -> Self {
        let mut board = Self {
            text: String::new(),
            height: BOARD_HEIGHT,
            pause_enabled: true,
            sound_on: true,
        };
        board.refresh(store);
        board
    }

    pub fn refresh(&mut self, store: &Store) {
        self.text = format!("Score: {} Health: {}", store.score, store.health);
    }

    /// Top edge of the strip in world units.
    pub fn top(&self, viewport_height: f32) -> f32 {
        viewport_height - self.height
    }

    pub fn toggle_sound(&mut self) {
        self.sound_on = !self.sound_on;
    }
}
