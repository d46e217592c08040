//! Round progression: score, lives, level and combo
//!
//! Phase graph:
//!
//! ```text
//! Idle --start--> Playing --all bricks--> LevelComplete --advance--> Playing
//!                    |                          |
//!                    +--no lives--> GameOver    +--quit--> Idle
//!                                     |
//!                                     +--restart--> Idle
//! ```
//!
//! Commands issued in the wrong phase are ignored and return false.

use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Begin a fresh round: score, lives, level, combo and entities reset
    pub fn start(&mut self) -> bool {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = 1;
        self.combo = 0;
        self.max_combo = 0;
        self.combo_timer = 0;
        self.paused = false;
        self.reset_level_entities();
        self.phase = GamePhase::Playing;
        log::info!("Round started (seed {})", self.seed);
        true
    }

    /// Move on to the next level, keeping score and lives
    pub fn advance_level(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("advance_level ignored in {:?}", self.phase);
            return false;
        }
        self.level += 1;
        self.combo = 0;
        self.combo_timer = 0;
        self.reset_level_entities();
        self.phase = GamePhase::Playing;
        log::info!(
            "Level {} started (ball speed {})",
            self.level,
            self.tuning.ball_speed_for_level(self.level)
        );
        true
    }

    /// Leave the level-complete screen without continuing
    pub fn quit(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("quit ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Idle;
        true
    }

    /// Return from game over to idle
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Idle;
        true
    }

    /// Flip the pause flag. Only meaningful while playing.
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("pause ignored in {:?}", self.phase);
            return false;
        }
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        true
    }

    /// Credit a destroyed brick: score, per-level counter, combo
    pub(crate) fn record_brick(&mut self, score_delta: u64) {
        self.score += score_delta;
        self.bricks_hit += 1;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.combo_timer = self.tuning.combo_window_ticks;
    }

    /// Count down the combo window; returns the reset event when it lapses
    pub(crate) fn decay_combo(&mut self) -> Option<GameEvent> {
        if self.combo_timer == 0 {
            return None;
        }
        self.combo_timer -= 1;
        if self.combo_timer == 0 && self.combo > 0 {
            let peak = self.combo;
            self.combo = 0;
            return Some(GameEvent::ComboReset { peak });
        }
        None
    }

    /// Every brick destroyed this level
    pub fn level_cleared(&self) -> bool {
        self.bricks_hit as usize == self.grid.total()
    }

    /// All balls are gone: take a life, then either serve again or end
    pub(crate) fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        self.lives = self.lives.saturating_sub(1);
        self.combo = 0;
        self.combo_timer = 0;
        events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over: score {}, level {}", self.score, self.level);
            events.push(GameEvent::GameOver { score: self.score });
        } else {
            log::info!("Life lost, {} left", self.lives);
            self.reset_serve();
        }
    }

    pub(crate) fn complete_level(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::LevelComplete;
        log::info!(
            "Level {} complete: {} bricks, {} paddle hits, max combo {}",
            self.level,
            self.bricks_hit,
            self.paddle_hits,
            self.max_combo
        );
        events.push(GameEvent::LevelComplete { level: self.level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_start_resets_round() {
        let mut state = GameState::new(5);
        state.score = 990;
        state.lives = 1;
        state.level = 4;
        state.max_combo = 12;
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.max_combo, 0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.grid.alive_count(), BRICK_COLUMNS * BRICK_ROWS);
    }

    #[test]
    fn test_advance_level_keeps_score_and_lives() {
        let mut state = GameState::new(5);
        state.start();
        state.score = 500;
        state.lives = 2;
        state.bricks_hit = 50;
        state.paddle_hits = 9;
        state.phase = GamePhase::LevelComplete;

        assert!(state.advance_level());
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 500);
        assert_eq!(state.lives, 2);
        assert_eq!(state.bricks_hit, 0);
        assert_eq!(state.paddle_hits, 0);
        assert_eq!(state.balls[0].vel.y, -(BALL_BASE_SPEED + BALL_SPEED_PER_LEVEL));
    }

    #[test]
    fn test_commands_ignored_in_wrong_phase() {
        let mut state = GameState::new(5);
        assert!(!state.advance_level());
        assert!(!state.restart());
        assert!(!state.quit());
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_quit_and_restart_return_to_idle() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::LevelComplete;
        assert!(state.quit());
        assert_eq!(state.phase, GamePhase::Idle);

        state.phase = GamePhase::GameOver;
        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_combo_window() {
        let mut state = GameState::new(5);
        state.record_brick(10);
        state.record_brick(10);
        assert_eq!(state.combo, 2);
        for _ in 0..COMBO_WINDOW_TICKS - 1 {
            assert!(state.decay_combo().is_none());
        }
        assert_eq!(
            state.decay_combo(),
            Some(GameEvent::ComboReset { peak: 2 })
        );
        assert_eq!(state.combo, 0);
        assert_eq!(state.max_combo, 2);
        assert!(state.decay_combo().is_none());
    }

    #[test]
    fn test_lose_life_until_game_over() {
        let mut state = GameState::new(5);
        state.start();
        let mut events = Vec::new();
        state.lose_life(&mut events);
        state.lose_life(&mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 1);
        state.lose_life(&mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
    }
}
