//! Game state and core simulation types
//!
//! One [`GameState`] owns every entity collection. Only the tick mutates it;
//! renderers get a [`super::RenderSnapshot`] copy between ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, EnemyKind, EntityId, Explosion, Player};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Player destroyed, waiting for a retry
    GameOver,
}

/// Gameplay events raised during a tick, for HUD and audio consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: EntityId, kind: EnemyKind },
    EnemyDestroyed { id: EntityId, kind: EnemyKind, reward: u64 },
    PlayerHit { health: i32 },
    LevelUp { level: u32 },
    GameOver { score: u64, new_high_score: bool },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score this process has seen; survives resets
    pub high_score: u64,
    pub level: u32,
    /// Ticks elapsed in the current run
    pub ticks: u64,
    /// Tick of the last player volley
    pub last_shot_tick: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Explosion>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u64,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        // The player always takes id 0
        let player = Player::new(EntityId(0), tuning.player_health);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            level: 1,
            ticks: 0,
            last_shot_tick: 0,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    /// Begin a fresh run in place
    ///
    /// Clears every collection and resets score, level and counters. The
    /// player is repositioned rather than recreated, and the high score and
    /// the id allocator carry over so ids are never reused.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.level = 1;
        self.ticks = 0;
        self.last_shot_tick = 0;
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.events.clear();
        self.player.respawn(tuning.player_health);
        self.phase = GamePhase::Running;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add to the score, saturating rather than wrapping
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
