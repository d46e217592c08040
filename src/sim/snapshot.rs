//! Read-only view of a game state for the renderer
//!
//! Built once per frame. Renderers draw from it and never touch the
//! simulation; any field a renderer has no widget for is simply ignored.

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::state::{GamePhase, GameState, PowerUpKind};
use crate::settings::Palette;

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub fireball: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

/// A running timed effect and its countdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectView {
    pub kind: PowerUpKind,
    pub remaining_ticks: u64,
}

/// Score panel values
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub bricks_hit: u32,
    pub paddle_hits: u32,
    pub phase: GamePhase,
    pub paused: bool,
    pub debug: bool,
    /// Timed effects in activation order
    pub effects: Vec<EffectView>,
    /// Measured render cadence; cosmetic only
    pub fps: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub canvas: (f32, f32),
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    /// Alive bricks only
    pub bricks: Vec<BrickView>,
    /// Active pickups only
    pub power_ups: Vec<PowerUpView>,
    pub palette: Palette,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(state: &GameState, palette: Palette, fps: u32) -> Self {
        let size = state.tuning.powerup_size;
        Self {
            canvas: (state.tuning.canvas_width, state.tuning.canvas_height),
            paddle: state.paddle.rect(),
            balls: state
                .balls
                .iter()
                .map(|b| BallView {
                    pos: b.pos,
                    radius: b.radius,
                    fireball: b.fireball,
                })
                .collect(),
            bricks: state
                .grid
                .iter_alive()
                .map(|b| BrickView {
                    rect: b.rect,
                    color: b.color,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpView {
                    rect: p.rect(size),
                    kind: p.kind,
                })
                .collect(),
            palette,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.level,
                combo: state.combo,
                max_combo: state.max_combo,
                bricks_hit: state.bricks_hit,
                paddle_hits: state.paddle_hits,
                phase: state.phase,
                paused: state.paused,
                debug: state.debug,
                effects: state
                    .effects
                    .iter()
                    .map(|e| EffectView {
                        kind: e.kind,
                        remaining_ticks: e.remaining(state.time_ticks),
                    })
                    .collect(),
                fps,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Theme;

    #[test]
    fn test_snapshot_skips_destroyed_bricks() {
        let mut state = GameState::new(1);
        state.start();
        state.grid.destroy(0, 0);
        state.grid.destroy(3, 2);

        let snapshot = Snapshot::capture(&state, Theme::Classic.palette(), 60);
        assert_eq!(snapshot.bricks.len(), state.grid.total() - 2);
        assert_eq!(snapshot.balls.len(), 1);
        assert_eq!(snapshot.paddle, state.paddle.rect());
        assert_eq!(snapshot.hud.fps, 60);
        assert_eq!(snapshot.hud.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hud_lists_effect_countdowns() {
        let mut state = GameState::new(1);
        state.start();
        state.time_ticks = 50;
        state.effects.activate(PowerUpKind::Slow, 0, 300);
        state.effects.activate(PowerUpKind::Widen, 40, 300);

        let snapshot = Snapshot::capture(&state, Theme::Classic.palette(), 0);
        assert_eq!(
            snapshot.hud.effects,
            vec![
                EffectView {
                    kind: PowerUpKind::Slow,
                    remaining_ticks: 250,
                },
                EffectView {
                    kind: PowerUpKind::Widen,
                    remaining_ticks: 290,
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let snapshot = Snapshot::capture(&state, Theme::Dark.palette(), 0);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"palette\""));
        assert!(json.contains("\"Idle\""));
    }
}
