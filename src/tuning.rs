//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`], so a
//! JSON file can rebalance a run without touching code. Missing keys fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::grid::GridLayout;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_speed_per_level: f32,

    pub brick_columns: usize,
    pub brick_rows: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_x: f32,
    pub brick_offset_y: f32,
    pub brick_color: u32,
    pub brick_score: u64,

    pub powerup_drop_chance: f64,
    pub powerup_fall_speed: f32,
    pub powerup_size: f32,
    pub effect_duration_ticks: u64,
    pub widen_factor: f32,
    pub slow_factor: f32,

    pub starting_lives: u8,
    pub combo_window_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_per_level: BALL_SPEED_PER_LEVEL,

            brick_columns: BRICK_COLUMNS,
            brick_rows: BRICK_ROWS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_x: BRICK_OFFSET_X,
            brick_offset_y: BRICK_OFFSET_Y,
            brick_color: BRICK_COLOR,
            brick_score: BRICK_SCORE,

            powerup_drop_chance: POWERUP_DROP_CHANCE,
            powerup_fall_speed: POWERUP_FALL_SPEED,
            powerup_size: POWERUP_SIZE,
            effect_duration_ticks: EFFECT_DURATION_TICKS,
            widen_factor: WIDEN_FACTOR,
            slow_factor: SLOW_FACTOR,

            starting_lives: STARTING_LIVES,
            combo_window_ticks: COMBO_WINDOW_TICKS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Brick layout derived from the grid parameters
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            cell_width: self.brick_width,
            cell_height: self.brick_height,
            padding: self.brick_padding,
            offset_x: self.brick_offset_x,
            offset_y: self.brick_offset_y,
        }
    }

    /// Initial ball speed for a 1-based level
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.ball_base_speed + self.ball_speed_per_level * level.saturating_sub(1) as f32
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_base_speed", self.ball_base_speed),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("powerup_fall_speed", self.powerup_fall_speed),
            ("powerup_size", self.powerup_size),
            ("widen_factor", self.widen_factor),
            ("slow_factor", self.slow_factor),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.effect_duration_ticks == 0 {
            return Err(ConfigError::NonPositive {
                field: "effect_duration_ticks",
            });
        }
        if self.combo_window_ticks == 0 {
            return Err(ConfigError::NonPositive {
                field: "combo_window_ticks",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NonPositive {
                field: "starting_lives",
            });
        }
        if self.ball_speed_per_level < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "ball_speed_per_level",
                value: self.ball_speed_per_level as f64,
            });
        }
        if self.brick_padding < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "brick_padding",
                value: self.brick_padding as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(ConfigError::OutOfRange {
                field: "powerup_drop_chance",
                value: self.powerup_drop_chance,
            });
        }
        if self.paddle_width * self.widen_factor > self.canvas_width {
            return Err(ConfigError::OutOfRange {
                field: "widen_factor",
                value: self.widen_factor as f64,
            });
        }
        if self.brick_columns == 0 || self.brick_rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let layout = self.grid_layout();
        let (width, height) = layout.extent(self.brick_columns, self.brick_rows);
        // Bricks must sit above the paddle lane
        let floor = self.canvas_height - self.paddle_height;
        if width > self.canvas_width
            || height >= floor
            || layout.offset_x < 0.0
            || layout.offset_y < 0.0
        {
            return Err(ConfigError::GridOverflow {
                width,
                height,
                canvas_width: self.canvas_width,
                canvas_height: self.canvas_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "brick_rows": 3, "starting_lives": 5 }"#).unwrap();
        assert_eq!(tuning.brick_rows, 3);
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.brick_columns, BRICK_COLUMNS);
        assert_eq!(tuning.paddle_width, PADDLE_WIDTH);
    }

    #[test]
    fn test_rejects_negative_canvas() {
        let tuning = Tuning {
            canvas_width: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositive {
                field: "canvas_width"
            })
        ));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let tuning = Tuning {
            brick_columns: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::EmptyGrid)));
    }

    #[test]
    fn test_rejects_grid_wider_than_canvas() {
        let tuning = Tuning {
            brick_columns: 40,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::GridOverflow { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_drop_chance() {
        let result = Tuning::from_json(r#"{ "powerup_drop_chance": 1.5 }"#);
        assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_ball_speed_scales_with_level() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ball_speed_for_level(1), 4.0);
        assert_eq!(tuning.ball_speed_for_level(3), 5.0);
        assert_eq!(tuning.ball_speed_for_level(0), 4.0);
    }
}
