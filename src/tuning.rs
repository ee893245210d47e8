//! Game balance tuning
//!
//! Every gameplay constant lives here so balance can be tweaked from a JSON
//! file without touching the simulation. Missing fields fall back to the
//! defaults, so a file only needs to name what it changes.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GAME_WIDTH;
use crate::sim::EnemyKind;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Fixed stats for one enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    /// Downward speed at level 1 (units per tick)
    pub speed: f32,
    /// Chance per tick of firing an aimed shot while on screen
    pub fire_chance: f32,
    /// Score awarded for the killing blow
    pub reward: u64,
    /// Whether ramming the player counts as a crash
    pub crash: bool,
}

impl Archetype {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_health: i32,
    /// Fraction of the remaining distance covered each tick
    pub player_lerp: f32,
    pub bank_factor: f32,
    /// Fires once more than this many ticks have passed since the last volley
    pub fire_rate_ticks: u64,
    pub player_bullet_speed: f32,
    pub player_bullet_size: Vec2,
    /// Volley angles per level (row 0 = level 1); the last row covers higher levels
    pub spread_table: Vec<Vec<f32>>,
    /// Horizontal speed per unit of spread angle
    pub spread_scale: f32,
    /// Shrink applied to hit boxes for hits against the player
    pub hitbox_buffer: f32,

    // === Enemies ===
    pub scout: Archetype,
    pub tank: Archetype,
    pub heavy: Archetype,
    /// Spawn rolls above this become Heavy
    pub heavy_threshold: f32,
    /// Spawn rolls above this (and not Heavy) become Tank
    pub tank_threshold: f32,
    pub scout_sway: f32,
    pub enemy_speed_per_level: f32,

    // === Spawn cadence ===
    pub spawn_interval_ticks: u64,
    pub spawn_interval_step: u64,
    pub spawn_interval_min: u64,

    // === Enemy fire ===
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_size: Vec2,
    pub enemy_fire_ceiling_margin: f32,

    // === Effects ===
    pub explosion_frames: u32,
    pub impact_explosion_size: f32,
    pub player_explosion_size: f32,

    // === Bounds ===
    pub enemy_despawn_margin: f32,
    pub bullet_despawn_margin: f32,

    // === Progression ===
    pub level_up_score: u64,
    pub max_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_health: 3,
            player_lerp: 0.2,
            bank_factor: 0.1,
            fire_rate_ticks: 5,
            player_bullet_speed: 20.0,
            player_bullet_size: Vec2::new(8.0, 24.0),
            spread_table: vec![
                vec![-0.1, 0.1],
                vec![-0.2, 0.0, 0.2],
                vec![-0.4, -0.15, 0.0, 0.15, 0.4],
            ],
            spread_scale: 10.0,
            hitbox_buffer: 15.0,

            scout: Archetype {
                width: 40.0,
                height: 40.0,
                health: 2,
                speed: 3.5,
                fire_chance: 0.01,
                reward: 100,
                crash: true,
            },
            tank: Archetype {
                width: 50.0,
                height: 60.0,
                health: 5,
                speed: 2.0,
                fire_chance: 0.02,
                reward: 100,
                crash: false,
            },
            heavy: Archetype {
                width: 100.0,
                height: 80.0,
                health: 15,
                speed: 1.0,
                fire_chance: 0.05,
                reward: 1000,
                crash: true,
            },
            heavy_threshold: 0.9,
            tank_threshold: 0.6,
            scout_sway: 1.5,
            enemy_speed_per_level: 0.1,

            spawn_interval_ticks: 45,
            spawn_interval_step: 10,
            spawn_interval_min: 20,

            enemy_bullet_speed: 7.0,
            enemy_bullet_size: Vec2::splat(14.0),
            enemy_fire_ceiling_margin: 100.0,

            explosion_frames: 20,
            impact_explosion_size: 20.0,
            player_explosion_size: 80.0,

            enemy_despawn_margin: 100.0,
            bullet_despawn_margin: 50.0,

            level_up_score: 2000,
            max_level: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn archetype(&self, kind: EnemyKind) -> &Archetype {
        match kind {
            EnemyKind::Scout => &self.scout,
            EnemyKind::Tank => &self.tank,
            EnemyKind::Heavy => &self.heavy,
        }
    }

    /// Volley angles for a level (levels start at 1)
    pub fn spread_for_level(&self, level: u32) -> &[f32] {
        let Some(last) = self.spread_table.len().checked_sub(1) else {
            return &[];
        };
        let row = (level.max(1) as usize - 1).min(last);
        &self.spread_table[row]
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        self.validate_finite()?;

        if !(self.player_lerp > 0.0 && self.player_lerp <= 1.0) {
            return Err(invalid("player_lerp", format!("{} not in (0, 1]", self.player_lerp)));
        }
        if self.player_health <= 0 {
            return Err(invalid("player_health", "must be positive"));
        }
        if self.spread_table.is_empty() || self.spread_table.iter().any(Vec::is_empty) {
            return Err(invalid("spread_table", "every level needs at least one bullet"));
        }
        if self.player_bullet_size.min_element() <= 0.0 {
            return Err(invalid("player_bullet_size", "must be positive"));
        }
        if self.enemy_bullet_size.min_element() <= 0.0 {
            return Err(invalid("enemy_bullet_size", "must be positive"));
        }

        for (field, arch) in [("scout", &self.scout), ("tank", &self.tank), ("heavy", &self.heavy)] {
            if arch.width <= 0.0 || arch.height <= 0.0 {
                return Err(invalid(field, "size must be positive"));
            }
            if arch.width > GAME_WIDTH {
                return Err(invalid(field, format!("width {} wider than the canvas", arch.width)));
            }
            if arch.health <= 0 {
                return Err(invalid(field, "health must be positive"));
            }
            if !(0.0..=1.0).contains(&arch.fire_chance) {
                return Err(invalid(field, format!("fire chance {} not in [0, 1]", arch.fire_chance)));
            }
        }

        if !(0.0..=GAME_WIDTH).contains(&self.scout_sway) {
            let reason = format!("{} not in [0, {}]", self.scout_sway, GAME_WIDTH);
            return Err(invalid("scout_sway", reason));
        }

        if !(0.0..=1.0).contains(&self.heavy_threshold) || !(0.0..=1.0).contains(&self.tank_threshold) {
            return Err(invalid("heavy_threshold", "thresholds must be in [0, 1]"));
        }
        if self.tank_threshold > self.heavy_threshold {
            return Err(invalid("tank_threshold", "must not exceed heavy_threshold"));
        }
        if self.spawn_interval_min == 0 || self.spawn_interval_ticks == 0 {
            return Err(invalid("spawn_interval_min", "spawn intervals must be at least one tick"));
        }
        if self.explosion_frames == 0 {
            return Err(invalid("explosion_frames", "must be at least one frame"));
        }
        if self.max_level == 0 {
            return Err(invalid("max_level", "must be at least 1"));
        }
        if self.level_up_score == 0 {
            return Err(invalid("level_up_score", "must be positive"));
        }
        Ok(())
    }

    /// JSON numbers past `f32::MAX` parse as infinity, so every float is checked
    fn validate_finite(&self) -> Result<(), TuningError> {
        let scalars = [
            ("player_lerp", self.player_lerp),
            ("bank_factor", self.bank_factor),
            ("player_bullet_speed", self.player_bullet_speed),
            ("spread_scale", self.spread_scale),
            ("hitbox_buffer", self.hitbox_buffer),
            ("heavy_threshold", self.heavy_threshold),
            ("tank_threshold", self.tank_threshold),
            ("scout_sway", self.scout_sway),
            ("enemy_speed_per_level", self.enemy_speed_per_level),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("enemy_fire_ceiling_margin", self.enemy_fire_ceiling_margin),
            ("impact_explosion_size", self.impact_explosion_size),
            ("player_explosion_size", self.player_explosion_size),
            ("enemy_despawn_margin", self.enemy_despawn_margin),
            ("bullet_despawn_margin", self.bullet_despawn_margin),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        if !self.player_bullet_size.is_finite() {
            return Err(invalid("player_bullet_size", "must be finite"));
        }
        if !self.enemy_bullet_size.is_finite() {
            return Err(invalid("enemy_bullet_size", "must be finite"));
        }
        if !self.spread_table.iter().flatten().all(|angle| angle.is_finite()) {
            return Err(invalid("spread_table", "angles must be finite"));
        }

        for (field, arch) in [("scout", &self.scout), ("tank", &self.tank), ("heavy", &self.heavy)] {
            let values = [arch.width, arch.height, arch.speed, arch.fire_chance];
            if !values.iter().all(|v| v.is_finite()) {
                return Err(invalid(field, "stats must be finite"));
            }
        }
        Ok(())
    }
}
