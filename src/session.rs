//! Session controller
//!
//! Owns the simulation state and the tick driver. Hosts call [`Session::start`]
//! to begin or retry a run, feed pointer positions through
//! [`Session::set_target`], and call [`Session::advance`] once per display
//! frame. The driver turns frame time into whole ticks; gameplay speed only
//! depends on the tick count.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GamePhase, GameState, RenderSnapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Fixed timestep accumulator
///
/// Frame deltas go in, whole ticks come out. Long frames are clamped so a
/// stalled host cannot queue an unbounded backlog.
#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    accumulator: f32,
}

impl TickDriver {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Add elapsed frame time in seconds
    pub fn accumulate(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.accumulator += dt.min(MAX_FRAME_DT);
    }

    #[inline]
    pub fn is_tick_due(&self) -> bool {
        self.accumulator >= SIM_DT
    }

    /// Take one tick's worth of time if available
    pub fn consume(&mut self) -> bool {
        if self.is_tick_due() {
            self.accumulator -= SIM_DT;
            true
        } else {
            false
        }
    }
}

/// One game session: state, input and at most one tick driver
#[derive(Debug)]
pub struct Session {
    state: GameState,
    tuning: Tuning,
    input: TickInput,
    driver: Option<TickDriver>,
}

impl Session {
    /// Create an idle session
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            input: TickInput::default(),
            driver: None,
        }
    }

    /// Begin a run, or retry after game over
    ///
    /// Calling this mid-run resets in place. The driver is replaced, never
    /// duplicated, so repeated calls never double the tick rate.
    pub fn start(&mut self) {
        self.state.reset(&self.tuning);
        self.input = TickInput::default();
        // Always a fresh driver, so no frame time carries over
        self.driver = Some(TickDriver::new());
        log::info!(
            "Run started (seed {}, high score {})",
            self.state.seed,
            self.state.high_score
        );
    }

    /// Halt the tick driver. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.driver.take().is_some() {
            log::debug!("Tick driver stopped at tick {}", self.state.ticks);
        }
    }

    /// Whether a tick driver is installed
    pub fn is_driving(&self) -> bool {
        self.driver.is_some()
    }

    /// Latest pointer position in world space, or `None` to hold position
    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.input.target = target;
    }

    /// Whether [`Session::advance`] would run at least one tick right now
    pub fn tick_due(&self) -> bool {
        self.state.is_running() && self.driver.as_ref().is_some_and(TickDriver::is_tick_due)
    }

    /// Run exactly one tick, bypassing the driver
    ///
    /// For hosts that schedule ticks themselves. Still a no-op unless a run
    /// is in progress.
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input, &self.tuning);
    }

    /// Feed one display frame's elapsed time; returns the ticks run
    ///
    /// The driver stops itself when the run ends.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let Some(driver) = self.driver.as_mut() else {
            return 0;
        };
        driver.accumulate(dt);

        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS && self.state.is_running() && driver.consume() {
            tick(&mut self.state, &self.input, &self.tuning);
            substeps += 1;
        }

        if !self.state.is_running() {
            self.stop();
        }
        substeps
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
