//! Brick Breaker headless runner
//!
//! Plays the simulation natively with the autopilot steering the paddle,
//! logging progress and recording the final score. The browser build uses
//! `brick_breaker::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use brick_breaker::persistence::{JsonFileStore, MemoryStore, ScoreStore};
    use brick_breaker::sim::{GameEvent, GamePhase, TickInput};
    use brick_breaker::{Session, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "brick-breaker", about = "Headless brick-breaker autopilot run")]
    struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Maximum ticks to simulate (60 per second of game time)
        #[arg(long, default_value_t = 60 * 60 * 10)]
        ticks: u64,
        /// Stop after clearing this many levels
        #[arg(long, default_value_t = 3)]
        levels: u32,
        /// High-score JSON file (in-memory when omitted)
        #[arg(long)]
        scores: Option<PathBuf>,
        /// Name recorded for a qualifying score
        #[arg(long, default_value = "AUTO")]
        name: String,
        /// Game balance overrides (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        log::info!("Brick Breaker (native) starting with seed {}", seed);

        match &args.scores {
            Some(path) => {
                let session = Session::with_tuning(seed, tuning, JsonFileStore::new(path))?;
                play(session, &args)
            }
            None => play(Session::with_tuning(seed, tuning, MemoryStore::new())?, &args),
        }
    }

    fn play<S: ScoreStore>(mut session: Session<S>, args: &Args) -> anyhow::Result<()> {
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        session.start();
        let mut ticks = 0;
        while ticks < args.ticks {
            for event in session.step(&input) {
                match event {
                    GameEvent::PowerUpActivated { kind } => log::info!("Power-up: {:?}", kind),
                    GameEvent::ComboReset { peak } if peak >= 5 => log::info!("Combo x{}", peak),
                    other => log::trace!("{:?}", other),
                }
            }
            ticks += 1;

            match session.phase() {
                GamePhase::LevelComplete if session.state.level < args.levels => {
                    session.advance_level();
                }
                GamePhase::LevelComplete | GamePhase::GameOver => break,
                _ => {}
            }
        }

        let state = &session.state;
        println!(
            "Finished after {} ticks: score {}, level {}, lives {}, max combo {}",
            ticks, state.score, state.level, state.lives, state.max_combo
        );

        if session.phase() == GamePhase::GameOver && session.restart() {
            if let Some(rank) = session.commit_score(&args.name)? {
                println!("New high score! Rank #{}", rank);
            }
        }

        for (i, entry) in session.high_scores().entries.iter().enumerate() {
            println!("{:>2}. {:<12} {:>8}", i + 1, entry.name, entry.score);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is brick_breaker::web::wasm_main
}
