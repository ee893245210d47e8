//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Phases run in
//! a fixed order; reordering them changes what the player sees.

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, BulletOwner, EnemyKind, EntityId};
use super::geometry::{clamp_into_canvas, overlaps};
use super::spawn::{spawn_enemy, spawn_enemy_bullet, spawn_explosion, spawn_interval, spawn_player_bullets};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::GAME_HEIGHT;
use crate::tuning::Tuning;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in world space; the craft centers on it over time
    pub target: Option<Vec2>,
}

/// Advance the game state by one tick
///
/// Does nothing unless a run is in progress.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }

    state.ticks += 1;
    let level_at_start = state.level;

    // 1. Player movement
    if let Some(target) = input.target {
        move_player(state, target, tuning);
    }

    // 2. Player firing
    if state.ticks.saturating_sub(state.last_shot_tick) > tuning.fire_rate_ticks {
        spawn_player_bullets(state, tuning);
        state.last_shot_tick = state.ticks;
    }

    // 3. Enemy spawning
    if state.ticks % spawn_interval(state.level, tuning) == 0 {
        spawn_enemy(state, tuning);
    }

    // 4. Kinematics and enemy fire
    advance_bodies(state, tuning);

    // 5. Particle aging
    for particle in &mut state.particles {
        particle.frame = particle.frame.saturating_add(1);
    }

    // 6. Sweep before collisions so nothing dead participates
    cleanup(state, tuning);

    // 7. Collisions
    resolve_player_bullets(state, tuning, level_at_start);
    resolve_enemy_bullets(state, tuning);
    resolve_crashes(state, tuning);

    // 8. Nothing that died this tick survives into the snapshot
    cleanup(state, tuning);
}

/// Ease the craft toward the pointer and keep it on the canvas
fn move_player(state: &mut GameState, target: Vec2, tuning: &Tuning) {
    if !target.is_finite() {
        return;
    }
    let player = &mut state.player;
    let goal = target - player.body.size / 2.0;
    let moved = player.body.pos + (goal - player.body.pos) * tuning.player_lerp;

    // Banking follows the unclamped remaining distance
    player.bank = (goal.x - moved.x) * tuning.bank_factor;
    player.body.pos = clamp_into_canvas(moved, player.body.size);
}

/// Integrate enemies and bullets; enemies roll to fire while on screen
fn advance_bodies(state: &mut GameState, tuning: &Tuning) {
    let fire_ceiling = GAME_HEIGHT - tuning.enemy_fire_ceiling_margin;
    let mut shooters: Vec<Body> = Vec::new();

    for enemy in &mut state.enemies {
        enemy.body.integrate();

        let roll: f32 = state.rng.random();
        let chance = tuning.archetype(enemy.kind).fire_chance;
        let y = enemy.body.pos.y;
        if roll < chance && y > 0.0 && y < fire_ceiling {
            shooters.push(enemy.body);
        }
    }

    // Fresh enemy shots move on the tick they are fired, like the volley
    for source in &shooters {
        spawn_enemy_bullet(state, source, tuning);
    }

    for bullet in &mut state.bullets {
        bullet.body.integrate();
    }
}

/// Drop everything that is dead, consumed, expired or out of bounds
///
/// Idempotent: a second call without movement in between changes nothing.
pub fn cleanup(state: &mut GameState, tuning: &Tuning) {
    let enemy_floor = GAME_HEIGHT + tuning.enemy_despawn_margin;
    state
        .enemies
        .retain(|e| e.is_alive() && e.body.pos.y < enemy_floor);

    let margin = tuning.bullet_despawn_margin;
    state.bullets.retain(|b| {
        let y = b.body.pos.y;
        b.alive && y > -margin && y < GAME_HEIGHT + margin
    });

    state.particles.retain(|p| !p.is_finished());
}

/// Player bullets against enemies
///
/// A bullet stops at its first hit. Enemies already at zero health are
/// skipped, so a second bullet in the same tick flies on.
fn resolve_player_bullets(state: &mut GameState, tuning: &Tuning, level_at_start: u32) {
    // (top-left, size) of each effect, in the order the hits happened
    let mut effects: Vec<(Vec2, f32)> = Vec::new();
    let mut kills: Vec<(EntityId, EnemyKind)> = Vec::new();

    for bullet in state
        .bullets
        .iter_mut()
        .filter(|b| b.owner == BulletOwner::Player)
    {
        for enemy in &mut state.enemies {
            if !bullet.alive {
                break;
            }
            if !enemy.is_alive() || !overlaps(&bullet.rect(), &enemy.rect(), 0.0) {
                continue;
            }

            bullet.alive = false;
            enemy.health -= 1;
            effects.push((bullet.body.pos, tuning.impact_explosion_size));

            if !enemy.is_alive() {
                effects.push((enemy.body.pos, enemy.body.size.x));
                kills.push((enemy.id, enemy.kind));
            }
        }
    }

    for (pos, size) in effects {
        spawn_explosion(state, pos, size, tuning);
    }

    for (id, kind) in kills {
        let reward = tuning.archetype(kind).reward;
        state.award(reward);
        state.events.push(GameEvent::EnemyDestroyed { id, kind, reward });
        log::debug!("{:?} {:?} destroyed, +{}", kind, id, reward);

        // One level per tick at most, however large the reward
        let threshold = u64::from(state.level).saturating_mul(tuning.level_up_score);
        if state.level == level_at_start && state.level < tuning.max_level && state.score > threshold {
            state.level += 1;
            state.events.push(GameEvent::LevelUp { level: state.level });
            log::info!("Level up: {} (score {})", state.level, state.score);
        }
    }
}

/// Enemy bullets against the player, with the forgiving hit box
fn resolve_enemy_bullets(state: &mut GameState, tuning: &Tuning) {
    let player_rect = state.player.rect();
    let mut hits = 0u32;

    for bullet in &mut state.bullets {
        if bullet.owner != BulletOwner::Enemy || !bullet.alive {
            continue;
        }
        if overlaps(&bullet.rect(), &player_rect, tuning.hitbox_buffer) {
            bullet.alive = false;
            hits += 1;
        }
    }

    for _ in 0..hits {
        apply_player_hit(state, tuning);
    }
}

/// Enemies ramming the player. Ground units are flown over.
fn resolve_crashes(state: &mut GameState, tuning: &Tuning) {
    let player_rect = state.player.rect();
    let mut crashes: Vec<(EntityId, EnemyKind, Vec2, f32)> = Vec::new();

    for enemy in &mut state.enemies {
        if !tuning.archetype(enemy.kind).crash || !enemy.is_alive() {
            continue;
        }
        if overlaps(&enemy.rect(), &player_rect, tuning.hitbox_buffer) {
            enemy.health = 0;
            crashes.push((enemy.id, enemy.kind, enemy.body.pos, enemy.body.size.x));
        }
    }

    for (id, kind, pos, size) in crashes {
        spawn_explosion(state, pos, size, tuning);
        state.events.push(GameEvent::EnemyDestroyed { id, kind, reward: 0 });
        log::debug!("{:?} {:?} crashed into the player", kind, id);
        apply_player_hit(state, tuning);
    }
}

/// Damage the player by one; the last point of health ends the run
///
/// This is the only path to [`GamePhase::GameOver`]. Hits after the run has
/// ended are ignored.
pub fn apply_player_hit(state: &mut GameState, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }

    state.player.health -= 1;
    let pos = state.player.body.pos;
    spawn_explosion(state, pos, tuning.player_explosion_size, tuning);
    state.events.push(GameEvent::PlayerHit {
        health: state.player.health,
    });
    log::debug!("Player hit, health {}", state.player.health);

    if state.player.health <= 0 {
        state.phase = GamePhase::GameOver;
        let new_high_score = state.score > state.high_score;
        if new_high_score {
            state.high_score = state.score;
        }
        state.events.push(GameEvent::GameOver {
            score: state.score,
            new_high_score,
        });
        log::info!(
            "Game over: score {} level {} (high score {})",
            state.score,
            state.level,
            state.high_score
        );
    }
}
