//! Error types
//!
//! Gameplay itself has no recoverable errors; these cover rejected
//! configuration and high-score storage failures.

/// Configuration errors, raised before a game state is built
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A dimension, speed or duration that must be strictly positive
    #[error("`{field}` must be positive")]
    NonPositive { field: &'static str },

    /// A grid with no columns or no rows
    #[error("brick grid must have at least one column and one row")]
    EmptyGrid,

    /// Brick layout does not fit inside the playfield
    #[error("brick grid ({width}x{height}) does not fit the {canvas_width}x{canvas_height} canvas")]
    GridOverflow {
        width: f32,
        height: f32,
        canvas_width: f32,
        canvas_height: f32,
    },

    /// A ratio or probability outside its allowed range
    #[error("`{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// Tuning file could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tuning file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// High-score storage errors
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backing store is missing (e.g. LocalStorage disabled)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
