//! Power-up spawning, falling pickups and timed effects
//!
//! Timed effects are tracked as `(kind, expires_at_tick)` entries checked
//! against the state's tick counter, so they pause with the game and never
//! depend on wall-clock time. Picking up an effect that is already running
//! refreshes its expiry instead of stacking.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GameState, PowerUp, PowerUpKind};

/// A running timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: PowerUpKind,
    pub expires_at_tick: u64,
}

impl TimedEffect {
    /// Ticks left at tick `now`
    pub fn remaining(&self, now: u64) -> u64 {
        self.expires_at_tick.saturating_sub(now)
    }
}

/// Active timed effects, at most one entry per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectTimers {
    entries: Vec<TimedEffect>,
}

impl EffectTimers {
    /// Start or refresh an effect. Returns true if it was not already active.
    pub fn activate(&mut self, kind: PowerUpKind, now: u64, duration: u64) -> bool {
        let expires_at_tick = now + duration;
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => {
                entry.expires_at_tick = expires_at_tick;
                false
            }
            None => {
                self.entries.push(TimedEffect {
                    kind,
                    expires_at_tick,
                });
                true
            }
        }
    }

    /// Remove and return every effect whose expiry tick has been reached,
    /// in activation order
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.entries.retain(|e| {
            if e.expires_at_tick <= now {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Running effects in activation order
    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Roll for a drop at a destroyed brick's center
pub fn maybe_spawn(state: &mut GameState, brick: &Rect) -> Option<PowerUp> {
    if !state.rng.random_bool(state.tuning.powerup_drop_chance) {
        return None;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    Some(PowerUp {
        id,
        kind,
        pos: brick.center(),
        active: true,
    })
}

/// Move active pickups down, collect the ones touching the paddle and drop
/// the ones that left the canvas. Returns collected kinds in pickup order.
pub fn update(state: &mut GameState) -> Vec<PowerUpKind> {
    let paddle = state.paddle.rect();
    let size = state.tuning.powerup_size;
    let fall = Vec2::new(0.0, state.tuning.powerup_fall_speed);
    let floor = state.tuning.canvas_height;

    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        power_up.pos += fall;
        let rect = power_up.rect(size);
        if rect.intersects(&paddle) {
            power_up.active = false;
            collected.push(power_up.kind);
        } else if rect.y > floor {
            power_up.active = false;
        }
    }
    state.power_ups.retain(|p| p.active);
    collected
}

/// Apply a collected power-up to the session
pub fn apply(state: &mut GameState, kind: PowerUpKind) {
    let now = state.time_ticks;
    let duration = state.tuning.effect_duration_ticks;

    match kind {
        PowerUpKind::Fireball => {
            state.effects.activate(kind, now, duration);
            for ball in state.balls.iter_mut() {
                ball.fireball = true;
            }
        }
        PowerUpKind::Widen => {
            if state.effects.activate(kind, now, duration) {
                let width = state.paddle.default_width * state.tuning.widen_factor;
                state.paddle.set_width(width, state.tuning.canvas_width);
            }
        }
        PowerUpKind::Slow => {
            state.effects.activate(kind, now, duration);
            let factor = state.tuning.slow_factor;
            for ball in state.balls.iter_mut().filter(|b| !b.slowed) {
                ball.vel *= factor;
                ball.slowed = true;
            }
        }
        PowerUpKind::MultiBall => {
            let originals = state.balls.clone();
            for original in originals {
                let id = state.next_entity_id();
                let mut clone = original;
                clone.id = id;
                clone.vel = -clone.vel;
                state.balls.push(clone);
            }
        }
    }
    log::debug!(
        "Power-up {:?} applied at tick {} ({} balls)",
        kind,
        now,
        state.balls.len()
    );
}

/// Undo a timed effect once it expires
pub fn revert(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Fireball => {
            for ball in state.balls.iter_mut() {
                ball.fireball = false;
            }
        }
        PowerUpKind::Widen => {
            let width = state.paddle.default_width;
            state.paddle.set_width(width, state.tuning.canvas_width);
        }
        PowerUpKind::Slow => {
            let restore = 1.0 / state.tuning.slow_factor;
            for ball in state.balls.iter_mut().filter(|b| b.slowed) {
                ball.vel *= restore;
                ball.slowed = false;
            }
        }
        PowerUpKind::MultiBall => {}
    }
    log::debug!("Power-up {:?} expired", kind);
}
