/// Game entity records and their per-tick update operations.
///
/// Everything here is a plain mutable record.  Entities never hold a
/// back-reference to the session; whatever world information an update
/// needs arrives through an explicit [`WorldContext`] parameter.

use rand::Rng;

use crate::input::{InputState, Key};

// ── World context ─────────────────────────────────────────────────────────────

/// Read-only world parameters threaded into every entity update.
#[derive(Clone, Copy, Debug)]
pub struct WorldContext {
    pub width: f32,
    pub height: f32,
    /// Background scroll rate; enemies drift against it.
    pub speed: f32,
    /// Debug overlay toggle (hitboxes, lives, counters).
    pub debug: bool,
}

impl WorldContext {
    pub fn new(width: f32, height: f32) -> Self {
        WorldContext {
            width,
            height,
            speed: 1.0,
            debug: false,
        }
    }
}

// ── Shared rectangle shape ────────────────────────────────────────────────────

/// Axis-aligned bounding box in world pixels.  `width` and `height`
/// are always positive for real entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Half-open overlap test: rects that merely share an edge do not
    /// collide.  Zero-area rects never overlap anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_WIDTH: f32 = 10.0;
pub const PROJECTILE_HEIGHT: f32 = 3.0;
pub const PROJECTILE_SPEED: f32 = 3.0;

/// A straight-line bolt fired by the player.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    pub speed_x: f32,
    /// Set once past the expiry line or spent on an enemy; the owning
    /// player drops it during its next update.
    pub expired: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32) -> Self {
        Projectile {
            rect: Rect::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed_x: PROJECTILE_SPEED,
            expired: false,
        }
    }

    /// Moves one fixed step per tick (deliberately not delta-scaled)
    /// and expires past 80% of the world width.
    pub fn advance(&mut self, world: &WorldContext) {
        self.rect.x += self.speed_x;
        if self.rect.x > 0.8 * world.width {
            self.expired = true;
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Last frame index of every sprite strip; frames cycle `0..=MAX_FRAME`.
pub const MAX_FRAME: u32 = 37;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    Angler1,
    Angler2,
    /// Colliding with the player grants a power-up instead of
    /// costing score.
    LuckyFish,
}

impl EnemyKind {
    pub fn size(&self) -> (f32, f32) {
        match self {
            EnemyKind::Angler1 => (60.0, 45.0),
            EnemyKind::Angler2 => (65.0, 50.0),
            EnemyKind::LuckyFish => (50.0, 40.0),
        }
    }

    pub fn lives(&self) -> i32 {
        match self {
            EnemyKind::Angler1 => 2,
            EnemyKind::Angler2 => 3,
            EnemyKind::LuckyFish => 3,
        }
    }

    /// Score awarded when the last life is taken by a projectile.
    pub fn score_value(&self) -> i32 {
        match self {
            EnemyKind::Angler1 => 2,
            EnemyKind::Angler2 => 3,
            EnemyKind::LuckyFish => 15,
        }
    }

    pub fn is_lucky(&self) -> bool {
        matches!(self, EnemyKind::LuckyFish)
    }

    /// Number of sprite-sheet rows to pick from at spawn (cosmetic).
    pub fn sprite_rows(&self) -> u32 {
        match self {
            EnemyKind::Angler1 => 3,
            EnemyKind::Angler2 => 2,
            EnemyKind::LuckyFish => 2,
        }
    }
}

/// A horizontally drifting obstacle.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    /// Negative: enemies always drift toward the left edge.
    pub speed_x: f32,
    pub lives: i32,
    pub frame_x: u32,
    /// Sprite row chosen at spawn; never changes afterwards.
    pub frame_y: u32,
    /// Set by collisions or by drifting fully off the left edge;
    /// the session compacts marked enemies at the end of each tick.
    pub removed: bool,
}

impl Enemy {
    /// Builds an enemy of the given kind with randomized vertical
    /// position, drift speed and sprite row.
    pub fn spawn(kind: EnemyKind, world: &WorldContext, rng: &mut impl Rng) -> Self {
        let (width, height) = kind.size();
        let y = rng.gen_range(0.0..(0.9 * world.height - height));
        let speed_x = rng.gen_range(-2.0..-0.5);
        let frame_y = rng.gen_range(0..kind.sprite_rows());
        Enemy {
            rect: Rect::new(world.width, y, width, height),
            kind,
            speed_x,
            lives: kind.lives(),
            frame_x: 0,
            frame_y,
            removed: false,
        }
    }

    /// Drifts left against the world scroll and cycles the animation
    /// frame; marks itself removed once fully off the left edge.
    pub fn advance(&mut self, world: &WorldContext) {
        self.rect.x += self.speed_x - world.speed;
        if self.rect.x + self.rect.width < 0.0 {
            self.removed = true;
        }
        if self.frame_x < MAX_FRAME {
            self.frame_x += 1;
        } else {
            self.frame_x = 0;
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 120.0;
pub const PLAYER_HEIGHT: f32 = 190.0;
pub const PLAYER_MAX_SPEED: f32 = 3.0;
pub const MAX_AMMO: f32 = 50.0;
/// Passive ammo regain per tick while powered up (not delta-scaled).
pub const POWER_UP_AMMO_REGEN: f32 = 0.1;
pub const POWER_UP_LIMIT_MS: f32 = 10_000.0;

/// Muzzle offsets relative to the player's top-left corner.
const MUZZLE_TOP: (f32, f32) = (80.0, 30.0);
const MUZZLE_BOTTOM: (f32, f32) = (80.0, 175.0);

/// The player avatar: vertical movement only, owns its live
/// projectiles in fire order.
#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub speed_y: f32,
    pub projectiles: Vec<Projectile>,
    pub ammo: f32,
    pub power_up: bool,
    pub power_up_timer: f32,
    pub frame_x: u32,
    /// 0 = normal sprite row, 1 = powered-up row.
    pub frame_y: u32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            rect: Rect::new(20.0, 100.0, PLAYER_WIDTH, PLAYER_HEIGHT),
            speed_y: 0.0,
            projectiles: Vec::new(),
            ammo: 20.0,
            power_up: false,
            power_up_timer: 0.0,
            frame_x: 0,
            frame_y: 0,
        }
    }

    /// One player tick: movement intent, projectile upkeep, animation,
    /// power-up bookkeeping.
    ///
    /// Vertical position is intentionally unclamped; the avatar may
    /// leave the visible world through the top or bottom edge.
    pub fn advance(&mut self, input: &InputState, delta: f32, world: &WorldContext) {
        // Up wins when both directions are held.
        if input.is_held(Key::MoveUp) {
            self.speed_y = -PLAYER_MAX_SPEED;
        } else if input.is_held(Key::MoveDown) {
            self.speed_y = PLAYER_MAX_SPEED;
        } else {
            self.speed_y = 0.0;
        }
        self.rect.y += self.speed_y;

        for projectile in &mut self.projectiles {
            projectile.advance(world);
        }
        self.projectiles.retain(|p| !p.expired);

        if self.frame_x < MAX_FRAME {
            self.frame_x += 1;
        } else {
            self.frame_x = 0;
        }

        if self.power_up {
            if self.power_up_timer > POWER_UP_LIMIT_MS {
                self.power_up_timer = 0.0;
                self.power_up = false;
                self.frame_y = 0;
            } else {
                self.power_up_timer += delta;
                self.frame_y = 1;
                if self.ammo < MAX_AMMO {
                    self.ammo = (self.ammo + POWER_UP_AMMO_REGEN).min(MAX_AMMO);
                }
            }
        }
    }

    /// Fires from the top muzzle, and also from the bottom muzzle
    /// while powered up.  Each shot is independently ammo-gated.
    pub fn fire(&mut self) {
        self.shoot_from(MUZZLE_TOP);
        if self.power_up {
            self.shoot_from(MUZZLE_BOTTOM);
        }
    }

    fn shoot_from(&mut self, (dx, dy): (f32, f32)) {
        if self.ammo <= 0.0 {
            return;
        }
        self.projectiles
            .push(Projectile::new(self.rect.x + dx, self.rect.y + dy));
        self.ammo = (self.ammo - 1.0).max(0.0);
    }

    /// Power-up pickup: full ammo refill immediately, then the timed
    /// buff (dual fire + passive regen) runs until it expires.
    pub fn enter_power_up(&mut self) {
        self.power_up_timer = 0.0;
        self.power_up = true;
        self.ammo = MAX_AMMO;
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}
