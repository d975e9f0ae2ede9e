/// All game entity types — pure data, no game rules.

use crate::config::Tuning;
use crate::error::ConfigError;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Side of the square player hit box, in logical pixels.
pub const PLAYER_SIZE: f32 = 50.0;
/// Side of the square enemy hit box.
pub const ENEMY_SIZE: f32 = 50.0;
pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 40.0;
/// Horizontal offset from the player's left edge to a fresh bullet.
pub const MUZZLE_OFFSET: f32 = 20.0;

/// Axis-aligned box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Strict on all four sides: boxes that merely touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// The rectangle every entity lives in, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    /// Fails when the area cannot hold a single entity, which would leave the
    /// spawner with an empty range and the player nowhere to stand.
    pub fn new(width: f32, height: f32) -> Result<PlayArea, ConfigError> {
        let min = PLAYER_SIZE.max(ENEMY_SIZE);
        if width.is_infinite() || height.is_infinite() {
            return Err(ConfigError::PlayAreaNotFinite { width, height });
        }
        if !(width >= min && height >= min) {
            return Err(ConfigError::PlayAreaTooSmall { width, height, min });
        }
        Ok(PlayArea { width, height })
    }

    /// Largest x a 50px-wide entity can take without leaving the area.
    pub fn max_x(&self) -> f32 {
        self.width - PLAYER_SIZE
    }

    pub fn max_y(&self) -> f32 {
        self.height - PLAYER_SIZE
    }

    /// Pull a player-sized box at `(x, y)` back inside the area.
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(0.0, self.max_x()), y.clamp(0.0, self.max_y()))
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
    /// A won run is also over: controls stay disabled until replay.
    Won,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Won)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Pixels travelled upward per tick.
    pub speed: f32,
}

impl Bullet {
    pub fn hitbox(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: BULLET_WIDTH,
            h: BULLET_HEIGHT,
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// May dip below zero when several enemies hit in the same tick.
    pub health: i32,
}

impl Player {
    pub fn hitbox(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: ENEMY_SIZE,
            h: ENEMY_SIZE,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub phase: Phase,
    pub area: PlayArea,
    pub tuning: Tuning,
    /// Next id handed to a spawned enemy.  Never reused within a process.
    pub next_enemy_id: u64,
    /// Ticks simulated in the current run.
    pub ticks: u64,
}
