//! Thunder Striker - simulation core for a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, tick, collisions)
//! - `session`: Run controller (start/stop/game over, tick driver)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, pointer input and the HUD live outside this crate. They read
//! [`sim::RenderSnapshot`] values and feed a target position back in.

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Session, TickDriver};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical canvas width in world units
    pub const GAME_WIDTH: f32 = 600.0;
    /// Logical canvas height in world units
    pub const GAME_HEIGHT: f32 = 800.0;

    /// Player craft is square
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Player spawn position (top-left corner)
    pub const PLAYER_START_X: f32 = GAME_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
    pub const PLAYER_START_Y: f32 = GAME_HEIGHT - 150.0;

    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
