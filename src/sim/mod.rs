//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (balls by insertion, bricks column-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod powerup;
pub mod progression;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, step_balls};
pub use grid::{Brick, BrickGrid, BrickStatus, GridLayout};
pub use powerup::{EffectTimers, TimedEffect};
pub use snapshot::Snapshot;
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, PowerUp, PowerUpKind};
pub use tick::{TickInput, tick};
