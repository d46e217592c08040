//! Brick Breaker - deterministic ball-and-paddle simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, power-ups, progression)
//! - `tuning`: Data-driven game balance
//! - `session`: Session commands and high-score bookkeeping
//! - `persistence`: High-score storage backends
//! - `driver`: Fixed-timestep frame driver
//! - `web`: Browser facade (wasm32 only)

pub mod driver;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::FixedStepDriver;
pub use error::{ConfigError, StoreError};
pub use highscores::HighScores;
pub use session::Session;
pub use settings::{Settings, Theme};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 860.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal paddle travel per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Ball defaults (speeds are pixels per tick)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 4.0;
    pub const BALL_SPEED_PER_LEVEL: f32 = 0.5;
    /// Gap between the serve position and the paddle top
    pub const BALL_SERVE_GAP: f32 = 10.0;

    /// Brick grid
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_X: f32 = 30.0;
    pub const BRICK_OFFSET_Y: f32 = 60.0;
    pub const BRICK_COLOR: u32 = 0xFF5555;
    pub const BRICK_SCORE: u64 = 10;

    /// Power-ups
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_SIZE: f32 = 20.0;
    /// Timed effect duration (5 seconds at 60 Hz)
    pub const EFFECT_DURATION_TICKS: u64 = 300;
    pub const WIDEN_FACTOR: f32 = 1.5;
    pub const SLOW_FACTOR: f32 = 0.5;

    /// Progression
    pub const STARTING_LIVES: u8 = 3;
    /// Ticks without a brick hit before the combo resets (2 seconds)
    pub const COMBO_WINDOW_TICKS: u32 = 120;
}
