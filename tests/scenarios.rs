use glam::Vec2;

use thunder_striker::sim::{
    Body, Bullet, BulletOwner, Enemy, EnemyKind, EntityId, GameEvent, GamePhase, GameState,
    TickInput, spawn_enemy, tick,
};
use thunder_striker::consts::GAME_WIDTH;
use thunder_striker::{Session, Tuning};

fn running(tuning: &Tuning) -> GameState {
    let mut state = GameState::new(2024, tuning);
    state.reset(tuning);
    state
}

fn add_enemy(state: &mut GameState, kind: EnemyKind, pos: Vec2, vel: Vec2, health: i32, tuning: &Tuning) -> EntityId {
    let id = state.next_entity_id();
    let size = tuning.archetype(kind).size();
    state.enemies.push(Enemy {
        id,
        kind,
        body: Body::new(pos, size, vel),
        health,
    });
    id
}

fn add_bullet(state: &mut GameState, owner: BulletOwner, pos: Vec2, vel: Vec2, tuning: &Tuning) -> EntityId {
    let id = state.next_entity_id();
    let size = match owner {
        BulletOwner::Player => tuning.player_bullet_size,
        BulletOwner::Enemy => tuning.enemy_bullet_size,
    };
    state.bullets.push(Bullet {
        id,
        owner,
        body: Body::new(pos, size, vel),
        alive: true,
    });
    id
}

#[test]
fn basic_kill() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    let scout = add_enemy(&mut state, EnemyKind::Scout, Vec2::new(100.0, -40.0), Vec2::new(0.0, 3.5), 1, &tuning);
    add_bullet(&mut state, BulletOwner::Player, Vec2::new(110.0, -20.0), Vec2::new(0.0, -20.0), &tuning);

    tick(&mut state, &TickInput::default(), &tuning);

    assert!(state.enemies.iter().all(|e| e.id != scout));
    assert_eq!(state.score, tuning.scout.reward);

    // One explosion the size of the scout where it died, plus the impact spark
    let blasts: Vec<_> = state
        .particles
        .iter()
        .filter(|p| p.body.size.x == tuning.scout.width)
        .collect();
    assert_eq!(blasts.len(), 1);
    assert_eq!(blasts[0].body.pos, Vec2::new(100.0, -36.5));
    assert_eq!(state.particles.len(), 2);

    assert!(state.events.iter().any(|e| matches!(
        e,
        GameEvent::EnemyDestroyed { id, kind: EnemyKind::Scout, .. } if *id == scout
    )));
}

#[test]
fn wounded_enemy_survives_with_impact_spark() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    let heavy = add_enemy(&mut state, EnemyKind::Heavy, Vec2::new(100.0, 100.0), Vec2::ZERO, 15, &tuning);
    add_bullet(&mut state, BulletOwner::Player, Vec2::new(120.0, 160.0), Vec2::ZERO, &tuning);

    tick(&mut state, &TickInput::default(), &tuning);

    let enemy = state.enemies.iter().find(|e| e.id == heavy).unwrap();
    assert_eq!(enemy.health, 14);
    assert_eq!(state.score, 0);
    assert_eq!(state.particles.len(), 1);
    assert_eq!(state.particles[0].body.size, Vec2::splat(tuning.impact_explosion_size));
}

#[test]
fn player_death_sets_high_score() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    state.high_score = 1000;
    state.score = 5000;
    state.player.health = 1;
    add_bullet(&mut state, BulletOwner::Enemy, Vec2::new(290.0, 670.0), Vec2::ZERO, &tuning);

    tick(&mut state, &TickInput::default(), &tuning);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.is_over() && !state.is_running());
    assert_eq!(state.high_score, 5000);
    assert!(state.events.contains(&GameEvent::GameOver {
        score: 5000,
        new_high_score: true
    }));
}

#[test]
fn player_death_keeps_better_high_score() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    state.high_score = 9000;
    state.score = 300;
    state.player.health = 1;
    add_bullet(&mut state, BulletOwner::Enemy, Vec2::new(290.0, 670.0), Vec2::ZERO, &tuning);

    tick(&mut state, &TickInput::default(), &tuning);

    assert!(state.is_over());
    assert_eq!(state.high_score, 9000);
}

#[test]
fn grazing_bullet_misses_forgiving_hitbox() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    // Clips the sprite's right edge but not the shrunken hit box
    let x = state.player.body.pos.x + 58.0;
    let y = state.player.body.pos.y + 20.0;
    add_bullet(&mut state, BulletOwner::Enemy, Vec2::new(x, y), Vec2::ZERO, &tuning);

    tick(&mut state, &TickInput::default(), &tuning);
    assert_eq!(state.player.health, tuning.player_health);
}

#[test]
fn level_up_boundary() {
    let mut tuning = Tuning::default();
    tuning.heavy.reward = 50_000;
    let mut state = running(&tuning);
    state.score = u64::from(state.level) * tuning.level_up_score - 1;
    add_enemy(&mut state, EnemyKind::Heavy, Vec2::new(100.0, 100.0), Vec2::ZERO, 1, &tuning);
    add_bullet(&mut state, BulletOwner::Player, Vec2::new(120.0, 160.0), Vec2::ZERO, &tuning);

    tick(&mut state, &TickInput::default(), &tuning);

    assert_eq!(state.level, 2);
    assert_eq!(state.score, 1999 + 50_000);
}

#[test]
fn level_up_needs_to_pass_threshold() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    state.score = 1900;
    add_enemy(&mut state, EnemyKind::Scout, Vec2::new(100.0, 100.0), Vec2::ZERO, 1, &tuning);
    add_bullet(&mut state, BulletOwner::Player, Vec2::new(110.0, 110.0), Vec2::ZERO, &tuning);

    tick(&mut state, &TickInput::default(), &tuning);

    // Exactly at the threshold is not past it
    assert_eq!(state.score, 2000);
    assert_eq!(state.level, 1);
}

#[test]
fn two_kills_one_tick_one_level() {
    let tuning = Tuning::default();
    let mut state = running(&tuning);
    state.score = 3950;
    state.level = 1;
    for x in [100.0, 300.0] {
        add_enemy(&mut state, EnemyKind::Scout, Vec2::new(x, 100.0), Vec2::ZERO, 1, &tuning);
        add_bullet(&mut state, BulletOwner::Player, Vec2::new(x + 10.0, 110.0), Vec2::ZERO, &tuning);
    }

    tick(&mut state, &TickInput::default(), &tuning);

    // 4150 passes both the level 1 and level 2 thresholds
    assert_eq!(state.score, 4150);
    assert_eq!(state.level, 2);
}

#[test]
fn spawn_bounds() {
    let tuning = Tuning::default();
    for seed in [1, 7, 99, 31337] {
        let mut state = GameState::new(seed, &tuning);
        state.reset(&tuning);
        for _ in 0..1000 {
            spawn_enemy(&mut state, &tuning);
        }
        for enemy in &state.enemies {
            let width = enemy.body.size.x;
            assert!(enemy.body.pos.x >= 0.0);
            assert!(enemy.body.pos.x <= GAME_WIDTH - width);
            assert_eq!(enemy.body.pos.y, -enemy.body.size.y);
        }
    }
}

#[test]
fn session_run_ends_and_retries() {
    let mut tuning = Tuning::default();
    // Make the sky hostile so the run ends quickly
    tuning.scout.fire_chance = 0.5;
    tuning.tank.fire_chance = 0.5;
    tuning.heavy.fire_chance = 0.5;
    tuning.spawn_interval_ticks = 5;
    tuning.spawn_interval_min = 5;

    let mut session = Session::new(77, tuning);
    session.start();

    let mut frames = 0;
    while session.is_driving() && frames < 20_000 {
        session.advance(1.0 / 60.0);
        frames += 1;
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert!(!session.is_driving(), "driver stops when the run ends");
    let snapshot = session.snapshot();
    assert!(snapshot.over && !snapshot.running);
    assert_eq!(session.high_score(), snapshot.score);

    // Further frames do nothing
    let ticks = session.state().ticks;
    assert_eq!(session.advance(1.0), 0);
    assert_eq!(session.state().ticks, ticks);

    // Retry keeps the high score and brings the craft back
    let high = session.high_score();
    session.start();
    assert_eq!(session.phase(), GamePhase::Running);
    assert!(session.is_driving());
    assert_eq!(session.high_score(), high);
    assert_eq!(session.state().player.health, session.tuning().player_health);
    assert_eq!(session.state().score, 0);
}
