//! Read-only render snapshot
//!
//! Taken between ticks, owned by the caller. Renderers and the HUD never see
//! the live collections.

use serde::Serialize;

use super::entity::{Bullet, Enemy, EntityKind, Explosion, Player};
use super::geometry::Rect;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub running: bool,
    pub over: bool,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Explosion>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.ticks,
            phase: state.phase,
            running: state.is_running(),
            over: state.is_over(),
            score: state.score,
            high_score: state.high_score,
            level: state.level,
            player: state.player.clone(),
            enemies: state.enemies.clone(),
            bullets: state.bullets.clone(),
            particles: state.particles.clone(),
        }
    }

    /// Everything drawable, back to front
    ///
    /// Ground units first, then bullets, aircraft, the player (hidden once
    /// destroyed) and explosions on top.
    pub fn entities(&self) -> impl Iterator<Item = (EntityKind, Rect)> + '_ {
        let ground = self
            .enemies
            .iter()
            .filter(|e| e.kind.is_ground())
            .map(|e| (e.kind.entity_kind(), e.rect()));
        let bullets = self.bullets.iter().map(|b| (b.entity_kind(), b.rect()));
        let air = self
            .enemies
            .iter()
            .filter(|e| !e.kind.is_ground())
            .map(|e| (e.kind.entity_kind(), e.rect()));
        let player = (!self.over).then(|| (EntityKind::Player, self.player.rect()));
        let effects = self
            .particles
            .iter()
            .map(|p| (EntityKind::Explosion, p.rect()));

        ground.chain(bullets).chain(air).chain(player).chain(effects)
    }

    /// How far an explosion has played, in [0, 1]
    pub fn explosion_progress(explosion: &Explosion) -> f32 {
        explosion.progress()
    }

    /// JSON form for hosts that ship frames across a boundary
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
