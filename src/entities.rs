//! Game entity types and the small amount of state logic they carry.

/// Stable handle for a staged entity.  Assigned by the stage on insertion;
/// `UNSTAGED` marks a freshly spawned value that has not been admitted yet.
pub type EntityId = u64;

pub const UNSTAGED: EntityId = 0;

// ── Tiers ─────────────────────────────────────────────────────────────────────

/// Target profile.  The three drifting tiers share one behaviour and differ
/// only in health; the shooter stands still and fires projectiles instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Light,
    Medium,
    Heavy,
    Shooter,
}

/// How a tier behaves on each frame tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Moves horizontally by `direction` every tick and escapes off-screen.
    Drift,
    /// Stays put and fires a projectile on its fire interval.
    Stationary,
}

impl Tier {
    /// Tiers that can be picked for periodic spawns.
    pub const DRIFTERS: [Tier; 3] = [Tier::Light, Tier::Medium, Tier::Heavy];

    pub fn max_health(self) -> i32 {
        match self {
            Tier::Light => 10,
            Tier::Medium => 25,
            Tier::Heavy => 50,
            Tier::Shooter => 100,
        }
    }

    /// Score awarded on a kill.  Always the tier's starting health.
    pub fn reward(self) -> u32 {
        self.max_health() as u32
    }

    pub fn movement(self) -> Movement {
        match self {
            Tier::Shooter => Movement::Stationary,
            _ => Movement::Drift,
        }
    }
}

// ── Entity kinds ──────────────────────────────────────────────────────────────

/// Coarse category used by the stage for bulk operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Target,
    Projectile,
    Pickup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Target(Tier),
    Projectile,
    Pickup,
}

impl EntityKind {
    pub fn tag(self) -> Tag {
        match self {
            EntityKind::Target(_) => Tag::Target,
            EntityKind::Projectile => Tag::Projectile,
            EntityKind::Pickup => Tag::Pickup,
        }
    }
}

/// Rendering switches.  Death flips all three off together; pause flips
/// only `interactive` and `animating`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RenderFlags {
    pub visible: bool,
    pub interactive: bool,
    pub animating: bool,
}

impl RenderFlags {
    pub fn enabled() -> Self {
        Self { visible: true, interactive: true, animating: true }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Blood splat left at a hit point, in the entity's local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct BloodMarker {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Uniform scale factor (projectiles grow from 0.05 towards 2.0).
    pub scale: f32,
    /// Sprite is flipped horizontally and extends to the left of `x`.
    pub mirrored: bool,
    /// Signed horizontal speed per tick.  Zero for stationary kinds.
    pub direction: f32,
    /// Only meaningful for targets.
    pub health: i32,
    pub alive: bool,
    /// Frame-change counter (projectile fuse, shooter fire rate).
    pub ticks: u32,
    pub flags: RenderFlags,
    pub blood: Vec<BloodMarker>,
}

impl Entity {
    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    pub fn tier(&self) -> Option<Tier> {
        match self.kind {
            EntityKind::Target(tier) => Some(tier),
            _ => None,
        }
    }

    /// Disable rendering, input and animation and mark the entity dead.
    /// Returns `false` if it was already dead.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.flags = RenderFlags::disabled();
        self.alive = false;
        true
    }
}

/// What a handler asks the game context to do after it ran.  Handlers flip
/// the entity's own state; the context applies economy and stage effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Nothing happened (missed hit, ordinary tick, or entity already dead).
    None,
    /// Hit landed but the target survived.
    Wounded,
    /// Target died from a hit; score increases by `reward`.
    Killed { reward: u32 },
    /// Drifting target left the screen.  No reward.
    Escaped,
    /// Shooter wants a projectile spawned at this point.
    Fire { x: f32, y: f32 },
    /// Projectile reached its fuse inside the viewport.
    Impact { damage: i32 },
    /// Projectile reached its fuse outside the viewport.
    Fizzled,
    /// Projectile was shot down before its fuse ran out.
    Defused,
    /// Pickup was clicked.
    Collected { power: i32 },
    /// Pickup fell onto the scoreboard or drifted out of view.
    Expired,
}

impl Outcome {
    /// True when the entity that produced this outcome is now dead and must
    /// leave the stage.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::None | Outcome::Wounded | Outcome::Fire { .. })
    }
}

// ── Geometry of the play area ─────────────────────────────────────────────────

/// Visible area in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    One,
    Two,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndReport {
    pub level: Level,
    pub won: bool,
    pub score: u32,
}

/// Full-screen display objects.  `Map` is the scrolling level background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Levels,
    Map,
    End(EndReport),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Pause,
}

/// One entry of the stage's display list, bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub enum StageItem {
    Screen(Screen),
    Entity(Entity),
    Scoreboard,
    Overlay(Overlay),
}
