//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; there is no global
//! state, so several sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grid::BrickGrid;
use super::powerup::EffectTimers;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start command
    Idle,
    /// Active gameplay
    Playing,
    /// Every brick destroyed, waiting for the next-level command
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Passes through bricks without reflecting
    pub fireball: bool,
    /// Velocity currently scaled by the slow effect
    pub slowed: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            fireball: false,
            slowed: false,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Width restored when the widen effect ends
    pub default_width: f32,
}

impl Paddle {
    /// Centered paddle resting on the bottom of the canvas
    pub fn new(width: f32, height: f32, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            x: (canvas_width - width) / 2.0,
            y: canvas_height - height,
            width,
            height,
            default_width: width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move horizontally, keeping x within [0, canvas_width - width]
    pub fn move_by(&mut self, dx: f32, canvas_width: f32) {
        self.x = (self.x + dx).clamp(0.0, (canvas_width - self.width).max(0.0));
    }

    /// Change width, re-clamping position to the canvas
    pub fn set_width(&mut self, width: f32, canvas_width: f32) {
        self.width = width;
        self.move_by(0.0, canvas_width);
    }

    pub fn recenter(&mut self, canvas_width: f32) {
        self.x = (canvas_width - self.width) / 2.0;
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Fireball,
    Widen,
    Slow,
    MultiBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Fireball,
        PowerUpKind::Widen,
        PowerUpKind::Slow,
        PowerUpKind::MultiBall,
    ];

    /// Whether the effect wears off after a duration
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerUpKind::MultiBall)
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Center position
    pub pos: Vec2,
    pub active: bool,
}

impl PowerUp {
    pub fn rect(&self, size: f32) -> Rect {
        Rect::new(self.pos.x - size / 2.0, self.pos.y - size / 2.0, size, size)
    }
}

/// Events raised by a simulation tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { ball_id: u32 },
    BrickDestroyed {
        column: usize,
        row: usize,
        rect: Rect,
        score_delta: u64,
    },
    BallLost { ball_id: u32 },
    AllBallsLost,
    LifeLost { lives_left: u8 },
    PowerUpSpawned { kind: PowerUpKind, pos: Vec2 },
    PowerUpActivated { kind: PowerUpKind },
    EffectExpired { kind: PowerUpKind },
    ComboReset { peak: u32 },
    LevelComplete { level: u32 },
    GameOver { score: u64 },
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Global pause flag, checked at the top of every tick
    pub paused: bool,
    /// Debug overlay toggle
    pub debug: bool,
    /// 1-based level
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Ticks left before the combo resets
    pub combo_timer: u32,
    /// Bricks destroyed this level
    pub bricks_hit: u32,
    /// Paddle bounces this level
    pub paddle_hits: u32,
    /// Playing ticks simulated so far
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// Active balls in insertion order
    pub balls: Vec<Ball>,
    pub grid: BrickGrid,
    pub power_ups: Vec<PowerUp>,
    pub effects: EffectTimers,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create an idle game state, rejecting invalid tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let paddle = Paddle::new(
            tuning.paddle_width,
            tuning.paddle_height,
            tuning.canvas_width,
            tuning.canvas_height,
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            paused: false,
            debug: false,
            level: 1,
            lives: tuning.starting_lives,
            score: 0,
            combo: 0,
            max_combo: 0,
            combo_timer: 0,
            bricks_hit: 0,
            paddle_hits: 0,
            time_ticks: 0,
            paddle,
            balls: Vec::new(),
            grid: BrickGrid::new(0, 0),
            power_ups: Vec::new(),
            effects: EffectTimers::default(),
            next_id: 1,
            tuning,
        };
        state.reset_level_entities();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ball sitting above the paddle, launched up and to a random side at
    /// the current level's speed
    pub fn serve_ball(&mut self) -> Ball {
        let t = &self.tuning;
        let speed = t.ball_speed_for_level(self.level);
        let pos = Vec2::new(
            t.canvas_width / 2.0,
            t.canvas_height - t.paddle_height - t.ball_radius - crate::consts::BALL_SERVE_GAP,
        );
        let radius = t.ball_radius;
        let dir_x = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let id = self.next_entity_id();
        Ball::new(id, pos, Vec2::new(speed * dir_x, -speed), radius)
    }

    /// Fresh grid, one served ball, centered default paddle, no pickups or
    /// effects, per-level counters cleared
    pub fn reset_level_entities(&mut self) {
        let t = &self.tuning;
        let mut grid = BrickGrid::with_color(t.brick_columns, t.brick_rows, t.brick_color);
        grid.layout(&t.grid_layout());
        self.grid = grid;

        self.paddle = Paddle::new(t.paddle_width, t.paddle_height, t.canvas_width, t.canvas_height);
        self.power_ups.clear();
        self.effects.clear();
        self.bricks_hit = 0;
        self.paddle_hits = 0;

        let ball = self.serve_ball();
        self.balls = vec![ball];
    }

    /// Ball and paddle position after a life is lost. Timed effects keep
    /// running and carry over to the new ball.
    pub fn reset_serve(&mut self) {
        let mut ball = self.serve_ball();
        ball.fireball = self.effects.is_active(PowerUpKind::Fireball);
        if self.effects.is_active(PowerUpKind::Slow) {
            ball.vel *= self.tuning.slow_factor;
            ball.slowed = true;
        }
        self.balls = vec![ball];
        self.paddle.recenter(self.tuning.canvas_width);
    }
}
