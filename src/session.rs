//! Play session
//!
//! Wraps a [`GameState`] with the commands a UI exposes (start, pause,
//! next level, restart) and the high-score check that runs when a finished
//! game is dismissed.

use crate::error::{ConfigError, StoreError};
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// One player's session
pub struct Session<S: ScoreStore> {
    pub state: GameState,
    pub settings: Settings,
    high_scores: HighScores,
    store: S,
    /// Final score waiting for a name after a qualifying restart
    pending_score: Option<u64>,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(seed: u64, store: S) -> Self {
        Self::from_state(GameState::new(seed), store)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, store: S) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::with_tuning(seed, tuning)?, store))
    }

    fn from_state(mut state: GameState, store: S) -> Self {
        let settings = Settings::load();
        state.debug = settings.debug_overlay;
        let high_scores = HighScores::load_from(&store);
        Self {
            state,
            settings,
            high_scores,
            store,
            pending_score: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn pending_score(&self) -> Option<u64> {
        self.pending_score
    }

    /// Begin a new round. Starting over from game over runs the same
    /// high-score check as [`restart`](Self::restart), so a qualifying
    /// score stays pending for [`commit_score`](Self::commit_score).
    pub fn start(&mut self) -> bool {
        if self.state.phase == GamePhase::GameOver {
            self.check_final_score();
        }
        self.state.start()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    pub fn advance_level(&mut self) -> bool {
        self.state.advance_level()
    }

    pub fn quit(&mut self) -> bool {
        self.state.quit()
    }

    /// Leave game over. Returns true when the final score earns a place on
    /// the leaderboard; call [`commit_score`](Self::commit_score) with the
    /// player's name to record it.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return self.state.restart();
        }
        let qualifies = self.check_final_score();
        self.state.restart();
        qualifies
    }

    /// Hold the final score for naming if it earns a leaderboard place
    fn check_final_score(&mut self) -> bool {
        let score = self.state.score;
        if self.high_scores.qualifies(score) {
            log::info!(
                "Score {} qualifies for rank {:?}",
                score,
                self.high_scores.potential_rank(score)
            );
            self.pending_score = Some(score);
            true
        } else {
            false
        }
    }

    /// Record the pending score under `name` and persist the list.
    /// Returns the rank achieved, or None if nothing was pending.
    pub fn commit_score(&mut self, name: &str) -> Result<Option<usize>, StoreError> {
        let Some(score) = self.pending_score.take() else {
            return Ok(None);
        };
        let rank = self.high_scores.add_score(name, score);
        if rank.is_some() {
            self.high_scores.save_to(&mut self.store)?;
        }
        Ok(rank)
    }

    /// Host window lost focus: pause a running round if the player asked
    /// for that. Returns true when the round was paused.
    pub fn blur(&mut self) -> bool {
        if !self.settings.pause_on_blur
            || self.state.phase != GamePhase::Playing
            || self.state.paused
        {
            return false;
        }
        self.state.toggle_pause()
    }

    /// Advance one fixed tick
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input)
    }

    pub fn snapshot(&self, fps: u32) -> Snapshot {
        Snapshot::capture(&self.state, self.settings.palette(), fps)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::highscores::{HighScoreEntry, MAX_HIGH_SCORES};
    use crate::persistence::MemoryStore;

    fn lose_all_lives<S: ScoreStore>(session: &mut Session<S>) {
        while session.phase() == GamePhase::Playing {
            let ball = &mut session.state.balls[0];
            ball.pos = Vec2::new(20.0, 700.0);
            ball.vel = Vec2::new(0.0, 4.0);
            session.step(&TickInput::default());
        }
    }

    #[test]
    fn test_restart_with_qualifying_score() {
        let mut session = Session::new(1, MemoryStore::new());
        assert!(session.start());
        session.state.score = 750;
        lose_all_lives(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);

        assert!(session.restart());
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.pending_score(), Some(750));

        assert_eq!(session.commit_score("ann").unwrap(), Some(1));
        assert_eq!(session.pending_score(), None);
        let stored = session.store().load().unwrap();
        assert_eq!(
            stored,
            vec![HighScoreEntry {
                name: "ann".into(),
                score: 750
            }]
        );

        // Nothing left to commit
        assert_eq!(session.commit_score("ann").unwrap(), None);
    }

    #[test]
    fn test_restart_with_zero_score() {
        let mut session = Session::new(1, MemoryStore::new());
        session.start();
        lose_all_lives(&mut session);
        assert!(!session.restart());
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.pending_score(), None);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = Session::new(1, MemoryStore::new());
        session.start();
        assert!(!session.restart());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_start_after_game_over_keeps_qualifying_score() {
        let mut session = Session::new(1, MemoryStore::new());
        session.start();
        session.state.score = 900;
        lose_all_lives(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);

        assert!(session.start());
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.pending_score(), Some(900));

        assert_eq!(session.commit_score("cy").unwrap(), Some(1));
        assert_eq!(session.high_scores().top_score(), Some(900));
        assert_eq!(session.store().load().unwrap().len(), 1);
    }

    #[test]
    fn test_start_mid_round_sets_nothing_pending() {
        let mut session = Session::new(1, MemoryStore::new());
        session.start();
        session.state.score = 400;
        assert!(session.start());
        assert_eq!(session.pending_score(), None);
    }

    #[test]
    fn test_blur_pauses_when_enabled() {
        let mut session = Session::new(1, MemoryStore::new());
        assert!(!session.blur());

        session.start();
        assert!(session.blur());
        assert!(session.state.paused);
        // Already paused: blur does not resume
        assert!(!session.blur());
        assert!(session.state.paused);
    }

    #[test]
    fn test_blur_ignored_when_disabled() {
        let mut session = Session::new(1, MemoryStore::new());
        session.settings.pause_on_blur = false;
        session.start();
        assert!(!session.blur());
        assert!(!session.state.paused);
    }

    #[test]
    fn test_loads_existing_board() {
        let entries = (1..=MAX_HIGH_SCORES as u64)
            .map(|i| HighScoreEntry {
                name: format!("p{i}"),
                score: i * 1000,
            })
            .collect();
        let mut session = Session::new(1, MemoryStore::with_entries(entries));
        assert_eq!(session.high_scores().top_score(), Some(10_000));

        session.start();
        session.state.score = 500;
        lose_all_lives(&mut session);
        assert!(!session.restart());
    }

    #[test]
    fn test_invalid_tuning_aborts() {
        let tuning = Tuning {
            brick_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::with_tuning(1, tuning, MemoryStore::new()),
            Err(ConfigError::EmptyGrid)
        ));
    }
}
