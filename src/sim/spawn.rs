//! Spawner
//!
//! Decides what enters the world: enemy archetypes, player volleys, aimed
//! enemy shots and explosion effects. Randomness only comes from the
//! state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, Bullet, BulletOwner, Enemy, EnemyKind, EntityId, Explosion};
use super::state::{GameEvent, GameState};
use crate::consts::GAME_WIDTH;
use crate::tuning::Tuning;

/// Player bullets appear this far above the craft's nose
const MUZZLE_OFFSET: f32 = 10.0;

/// Ticks between enemy spawns at a given level
pub fn spawn_interval(level: u32, tuning: &Tuning) -> u64 {
    let step = tuning
        .spawn_interval_step
        .saturating_mul(u64::from(level.saturating_sub(1)));
    tuning
        .spawn_interval_ticks
        .saturating_sub(step)
        .max(tuning.spawn_interval_min)
        .max(1)
}

/// Map a uniform roll in [0, 1) to an archetype
pub fn roll_enemy_kind(roll: f32, tuning: &Tuning) -> EnemyKind {
    if roll > tuning.heavy_threshold {
        EnemyKind::Heavy
    } else if roll > tuning.tank_threshold {
        EnemyKind::Tank
    } else {
        EnemyKind::Scout
    }
}

/// Spawn one enemy just above the top edge
pub fn spawn_enemy(state: &mut GameState, tuning: &Tuning) -> EntityId {
    let roll: f32 = state.rng.random();
    let kind = roll_enemy_kind(roll, tuning);
    let arch = *tuning.archetype(kind);

    let level_bonus = tuning.enemy_speed_per_level * state.level.saturating_sub(1) as f32;
    let speed = arch.speed * (1.0 + level_bonus);

    let max_x = (GAME_WIDTH - arch.width).max(0.0);
    let x = state.rng.random_range(0.0..=max_x).min(max_x);

    // Scouts drift sideways, everything else flies straight
    let vx = if kind == EnemyKind::Scout && tuning.scout_sway > 0.0 {
        state.rng.random_range(-tuning.scout_sway..=tuning.scout_sway)
    } else {
        0.0
    };

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        kind,
        body: Body::new(Vec2::new(x, -arch.height), arch.size(), Vec2::new(vx, speed)),
        health: arch.health,
    });
    state.events.push(GameEvent::EnemySpawned { id, kind });
    log::debug!("Spawned {:?} {:?} at x={:.1}", kind, id, x);
    id
}

/// Fire a player volley from the craft's nose
///
/// The spread pattern widens with level. Every bullet shares the same
/// forward speed; the angle only adds horizontal drift.
pub fn spawn_player_bullets(state: &mut GameState, tuning: &Tuning) -> usize {
    let source = state.player.body;
    let size = tuning.player_bullet_size;
    let origin = Vec2::new(
        source.pos.x + source.size.x / 2.0 - size.x / 2.0,
        source.pos.y - MUZZLE_OFFSET,
    );

    let angles = tuning.spread_for_level(state.level);
    for &angle in angles {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            owner: BulletOwner::Player,
            body: Body::new(
                origin,
                size,
                Vec2::new(angle * tuning.spread_scale, -tuning.player_bullet_speed),
            ),
            alive: true,
        });
    }
    angles.len()
}

/// Fire one bullet from `source` aimed at the player
///
/// A source sitting exactly on the player fires straight down.
pub fn spawn_enemy_bullet(state: &mut GameState, source: &Body, tuning: &Tuning) -> EntityId {
    let size = tuning.enemy_bullet_size;
    let dir = (state.player.body.pos - source.pos)
        .try_normalize()
        .unwrap_or(Vec2::Y);

    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        owner: BulletOwner::Enemy,
        body: Body::new(
            Vec2::new(
                source.pos.x + source.size.x / 2.0 - size.x / 2.0,
                source.pos.y + source.size.y / 2.0,
            ),
            size,
            dir * tuning.enemy_bullet_speed,
        ),
        alive: true,
    });
    id
}

/// Spawn an explosion effect with its top-left corner at `pos`
///
/// Duration is fixed regardless of size.
pub fn spawn_explosion(state: &mut GameState, pos: Vec2, size: f32, tuning: &Tuning) -> EntityId {
    let id = state.next_entity_id();
    state.particles.push(Explosion {
        id,
        body: Body::new(pos, Vec2::splat(size), Vec2::ZERO),
        frame: 0,
        frame_limit: tuning.explosion_frames,
    });
    id
}
