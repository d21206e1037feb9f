//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate; only the session countdown reads a clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order of enemies and projectiles)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod element;
pub mod enemy;
pub mod map;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Rect, collides_any, move_with_collision};
pub use combat::{CombatOutcome, is_effective, resolve_projectiles};
pub use element::Element;
pub use enemy::Enemy;
pub use map::{DEFAULT_LAYOUT, MapError, TileKind, TileMap};
pub use player::Player;
pub use projectile::Projectile;
pub use spawn::SpawnController;
pub use state::{GameEvent, GameOverReason, GamePhase, SimulationState};
pub use tick::{TickInput, tick};
pub use view::{FrameSnapshot, Sprite};
