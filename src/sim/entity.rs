//! Entity types
//!
//! Each kind family has its own record so invalid combinations (a player
//! with an animation frame, a bullet with hit points) cannot be built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{PLAYER_SIZE, PLAYER_START_X, PLAYER_START_Y};

/// Unique entity identifier, never reused within a [`super::GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Flat kind tag handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    ScoutEnemy,
    HeavyEnemy,
    TankEnemy,
    PlayerBullet,
    EnemyBullet,
    Explosion,
}

/// Position, size and per-tick velocity shared by every moving object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// World units per tick
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Explicit Euler step, one tick = one unit of time
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub health: i32,
    /// Visual banking signal, roughly the remaining horizontal distance to
    /// the target. Not a velocity: the player never integrates it.
    pub bank: f32,
}

impl Player {
    pub fn new(id: EntityId, health: i32) -> Self {
        Self {
            id,
            body: Body::new(
                Vec2::new(PLAYER_START_X, PLAYER_START_Y),
                Vec2::splat(PLAYER_SIZE),
                Vec2::ZERO,
            ),
            health,
            bank: 0.0,
        }
    }

    /// Put the craft back on the launch pad with full health
    pub fn respawn(&mut self, health: i32) {
        self.body.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.body.vel = Vec2::ZERO;
        self.health = health;
        self.bank = 0.0;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile, drifts sideways
    Scout,
    /// Slow gunship with a lot of armor
    Heavy,
    /// Ground unit, the player flies over it
    Tank,
}

impl EnemyKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            EnemyKind::Scout => EntityKind::ScoutEnemy,
            EnemyKind::Heavy => EntityKind::HeavyEnemy,
            EnemyKind::Tank => EntityKind::TankEnemy,
        }
    }

    /// Ground units render beneath bullets and aircraft
    pub fn is_ground(self) -> bool {
        matches!(self, EnemyKind::Tank)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    pub health: i32,
}

impl Enemy {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile. Bullets are one-shot: the first hit consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub owner: BulletOwner,
    pub body: Body,
    pub alive: bool,
}

impl Bullet {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self.owner {
            BulletOwner::Player => EntityKind::PlayerBullet,
            BulletOwner::Enemy => EntityKind::EnemyBullet,
        }
    }
}

/// A timed explosion effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: EntityId,
    pub body: Body,
    pub frame: u32,
    pub frame_limit: u32,
}

impl Explosion {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frame >= self.frame_limit
    }

    /// Animation progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.frame_limit == 0 {
            return 1.0;
        }
        (self.frame as f32 / self.frame_limit as f32).min(1.0)
    }
}
