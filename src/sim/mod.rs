//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, cadences counted in ticks
//! - Seeded RNG only
//! - Stable iteration order (insertion order, never mutated mid-pass)
//! - No rendering or platform dependencies

pub mod entity;
pub mod geometry;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use entity::{Body, Bullet, BulletOwner, Enemy, EnemyKind, EntityId, EntityKind, Explosion, Player};
pub use geometry::{Rect, clamp_into_canvas, overlaps};
pub use snapshot::RenderSnapshot;
pub use spawn::{spawn_enemy, spawn_enemy_bullet, spawn_explosion, spawn_interval, spawn_player_bullets};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, apply_player_hit, cleanup, tick};
