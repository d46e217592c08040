//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{Bounds, step_balls};
use super::powerup;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left key held
    pub left: bool,
    /// Move-right key held
    pub right: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Debug overlay toggle (one-shot)
    pub toggle_debug: bool,
    /// Idle/demo mode - the paddle follows the ball on its own
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.toggle_debug {
        state.debug = !state.debug;
    }
    if input.pause {
        state.toggle_pause();
    }

    // Don't tick unless actively playing
    if state.phase != GamePhase::Playing || state.paused {
        return events;
    }

    state.time_ticks += 1;

    // Timed effects wear off before anything moves
    for kind in state.effects.expire(state.time_ticks) {
        powerup::revert(state, kind);
        events.push(GameEvent::EffectExpired { kind });
    }

    if let Some(event) = state.decay_combo() {
        events.push(event);
    }

    // Update paddle position
    let (left, right) = if input.idle_mode {
        autopilot(state)
    } else {
        (input.left, input.right)
    };
    let speed = state.tuning.paddle_speed;
    let canvas_width = state.tuning.canvas_width;
    if right {
        state.paddle.move_by(speed, canvas_width);
    } else if left {
        state.paddle.move_by(-speed, canvas_width);
    }

    // Balls, walls, paddle, bricks
    let bounds = Bounds {
        width: state.tuning.canvas_width,
        height: state.tuning.canvas_height,
    };
    let ball_events = step_balls(
        &mut state.balls,
        &state.paddle,
        &mut state.grid,
        bounds,
        state.tuning.brick_score,
    );

    // Collect pickups to spawn (deferred so they start falling next tick)
    let mut spawned = Vec::new();
    let mut all_lost = false;
    for event in &ball_events {
        match event {
            GameEvent::BrickDestroyed {
                rect, score_delta, ..
            } => {
                state.record_brick(*score_delta);
                if let Some(power_up) = powerup::maybe_spawn(state, rect) {
                    spawned.push(power_up);
                }
            }
            GameEvent::PaddleHit { .. } => state.paddle_hits += 1,
            GameEvent::AllBallsLost => all_lost = true,
            _ => {}
        }
    }
    events.extend(ball_events);

    // Falling pickups
    for kind in powerup::update(state) {
        // Nothing to duplicate or modify once every ball is gone
        if !state.balls.is_empty() {
            powerup::apply(state, kind);
        }
        events.push(GameEvent::PowerUpActivated { kind });
    }
    for power_up in spawned {
        events.push(GameEvent::PowerUpSpawned {
            kind: power_up.kind,
            pos: power_up.pos,
        });
        state.power_ups.push(power_up);
    }

    // Clearing the last brick wins over losing the last ball
    if state.level_cleared() {
        state.complete_level(&mut events);
    } else if all_lost {
        state.lose_life(&mut events);
    }

    events
}

/// Steer toward the lowest descending ball (or the lowest ball at all)
fn autopilot(state: &GameState) -> (bool, bool) {
    let target = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| state.balls.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)));

    let Some(ball) = target else {
        return (false, false);
    };

    // Aim slightly off-center so the bounce angle varies
    let aim = ball.pos.x + ball.vel.x.signum() * state.paddle.width * 0.15;
    let dead_zone = state.tuning.paddle_speed / 2.0;
    let center = state.paddle.center_x();
    (center > aim + dead_zone, center < aim - dead_zone)
}
