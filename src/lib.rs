//! Elemental Arena - a top-down elemental combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, spawning)
//! - `audio`: Fire-and-forget sound triggers derived from simulation events
//! - `settings`: JSON-backed session settings
//! - `demo`: Autopilot input for headless/demo sessions

pub mod audio;
pub mod demo;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Edge length of one map tile (pixels)
    pub const TILE_SIZE: f32 = 16.0;

    /// Player spawn tile (column, row)
    pub const PLAYER_SPAWN_TILE: (usize, usize) = (3, 3);
    /// Player movement per tick, per axis
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const MAX_HEALTH: u8 = 5;
    /// Ticks after a hit during which further damage is ignored (1 second)
    pub const INVULNERABILITY_TICKS: u32 = 60;
    /// Initial knockback displacement per tick after a hit
    pub const KNOCKBACK_STRENGTH: f32 = 8.0;
    /// Knockback multiplier applied every tick
    pub const KNOCKBACK_DECAY: f32 = 0.8;
    /// Knockback below this length snaps to zero
    pub const KNOCKBACK_EPSILON: f32 = 0.1;

    pub const ENEMY_SPEED: f32 = 1.5;
    /// Neighbours closer than this push each other apart
    pub const SEPARATION_RADIUS: f32 = 24.0;
    /// Separation gain; at very close range it outweighs the unit pursuit vector
    pub const SEPARATION_WEIGHT: f32 = 2.0;

    pub const PROJECTILE_SPEED: f32 = 6.0;
    pub const PROJECTILE_SIZE: f32 = 6.0;
    /// Ticks between shots (300 ms at 60 Hz)
    pub const SHOOT_COOLDOWN_TICKS: u32 = 18;

    /// Maximum concurrent enemies
    pub const MAX_ENEMIES: usize = 10;
    /// Ticks between successful spawns (3 seconds at 60 Hz)
    pub const SPAWN_DELAY_TICKS: u32 = 180;
    /// Random tile draws per spawn attempt before giving up for this tick
    pub const SPAWN_RETRY_LIMIT: u32 = 100;

    /// Session countdown (seconds of real time)
    pub const GAME_DURATION_SECS: u64 = 120;
}

/// Simulated clock reading after `ticks` ticks at `TICK_RATE`
///
/// Computed from the tick count rather than a per-tick step, so 60 ticks are
/// exactly one second.
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE as u64
}

/// Axis input (-1, 0, 1) from a pair of opposing keys
#[inline]
pub fn axis(negative: bool, positive: bool) -> f32 {
    positive as i8 as f32 - negative as i8 as f32
}

/// Top-left position of a tile in world space
#[inline]
pub fn tile_to_world(col: usize, row: usize) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE_SIZE, row as f32 * consts::TILE_SIZE)
}

/// Tile containing a world position (None when left of or above the map)
#[inline]
pub fn world_to_tile(pos: Vec2) -> Option<(usize, usize)> {
    if pos.x < 0.0 || pos.y < 0.0 {
        return None;
    }
    Some((
        (pos.x / consts::TILE_SIZE) as usize,
        (pos.y / consts::TILE_SIZE) as usize,
    ))
}
