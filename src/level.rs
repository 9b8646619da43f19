//! Level tables.

use crate::entities::{Level, Tier};

impl Level {
    pub const ALL: [Level; 2] = [Level::One, Level::Two];

    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Level> {
        match n {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            _ => None,
        }
    }

    /// Targets staged when the level starts.
    pub fn roster(self) -> &'static [Tier] {
        match self {
            Level::One => &[Tier::Light, Tier::Medium, Tier::Shooter],
            Level::Two => &[Tier::Light, Tier::Medium, Tier::Heavy, Tier::Shooter],
        }
    }

    /// Ticks between periodic drifting-target spawns.
    pub fn spawn_interval(self) -> u32 {
        match self {
            Level::One => 90,
            Level::Two => 60,
        }
    }

    /// Ticks between bucket drops.
    pub fn pickup_interval(self) -> u32 {
        match self {
            Level::One => 300,
            Level::Two => 240,
        }
    }

    /// Total targets the level spawns, roster included.
    pub fn quota(self) -> u32 {
        match self {
            Level::One => 12,
            Level::Two => 20,
        }
    }
}
