//! Thunder Striker headless runner
//!
//! Drives a session at a fixed frame rate without a renderer. Useful for
//! balance checks and soak tests.

use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use thunder_striker::consts::{GAME_HEIGHT, PLAYER_START_Y, SIM_DT};
use thunder_striker::sim::{GameEvent, GamePhase, RenderSnapshot};
use thunder_striker::{Session, Tuning};

/// Run the shooter simulation headless
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Ticks to simulate before stopping
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// JSON tuning file (missing fields use defaults)
    #[arg(long)]
    tuning: Option<std::path::PathBuf>,

    /// Steer toward the nearest enemy instead of holding still
    #[arg(long)]
    autopilot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    phase: GamePhase,
    score: u64,
    high_score: u64,
    level: u32,
    kills: u32,
    hits_taken: u32,
}

/// Pick a pointer target: under the lowest on-screen enemy, near the bottom
fn autopilot_target(snapshot: &RenderSnapshot) -> Option<Vec2> {
    let cruise_y = PLAYER_START_Y + snapshot.player.body.size.y / 2.0;
    snapshot
        .enemies
        .iter()
        .filter(|e| e.body.pos.y > 0.0 && e.body.pos.y < GAME_HEIGHT)
        .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
        .map(|e| Vec2::new(e.rect().center().x, cruise_y))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Thunder Striker (headless) starting with seed {}", args.seed);

    let mut session = Session::new(args.seed, tuning);
    session.start();

    let mut kills = 0u32;
    let mut hits_taken = 0u32;
    let mut elapsed = 0u64;

    while elapsed < args.ticks && session.is_driving() {
        if args.autopilot {
            let snapshot = session.snapshot();
            session.set_target(autopilot_target(&snapshot));
        }

        elapsed += u64::from(session.advance(SIM_DT));

        for event in session.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { reward, .. } if reward > 0 => kills += 1,
                GameEvent::PlayerHit { .. } => hits_taken += 1,
                _ => {}
            }
        }
    }
    session.stop();

    let snapshot = session.snapshot();
    let summary = Summary {
        seed: args.seed,
        ticks: snapshot.tick,
        phase: snapshot.phase,
        score: snapshot.score,
        high_score: snapshot.high_score,
        level: snapshot.level,
        kills,
        hits_taken,
    };

    match serde_json::to_string(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode summary: {e}");
            ExitCode::FAILURE
        }
    }
}
