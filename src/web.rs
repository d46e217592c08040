//! Browser facade
//!
//! The page owns the canvas, the DOM and `requestAnimationFrame`; it calls
//! [`WebGame::frame`] once per animation frame and draws the returned
//! snapshot JSON.

use wasm_bindgen::prelude::*;

use crate::driver::FixedStepDriver;
use crate::persistence::LocalStorageStore;
use crate::session::Session;
use crate::settings::Theme;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Brick Breaker starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
    driver: FixedStepDriver,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: Session::new(seed, LocalStorageStore::default()),
            driver: FixedStepDriver::new(),
            last_time: 0.0,
        }
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.session.toggle_pause()
    }

    pub fn advance_level(&mut self) -> bool {
        self.session.advance_level()
    }

    /// True when the final score should prompt for a name
    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    /// Returns the rank achieved, or 0 if nothing was recorded
    pub fn commit_score(&mut self, name: &str) -> u32 {
        match self.session.commit_score(name) {
            Ok(rank) => rank.map(|r| r as u32).unwrap_or(0),
            Err(e) => {
                log::warn!("Could not save high score: {}", e);
                0
            }
        }
    }

    /// Call from the page's `blur`/`visibilitychange` handler
    pub fn blur(&mut self) -> bool {
        self.session.blur()
    }

    /// Key press/release. Unknown keys are ignored.
    pub fn set_key(&mut self, key: &str, pressed: bool) {
        let input = &mut self.driver.input;
        match key {
            "ArrowLeft" | "Left" | "a" => input.left = pressed,
            "ArrowRight" | "Right" | "d" => input.right = pressed,
            "p" | "Escape" if pressed => input.pause = true,
            "F3" | "`" if pressed => input.toggle_debug = true,
            "i" if pressed => input.idle_mode = !input.idle_mode,
            _ => {}
        }
    }

    /// Advance to `time_ms` (the rAF timestamp) and return the snapshot JSON
    pub fn frame(&mut self, time_ms: f64) -> String {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time_ms;

        for event in self.driver.update(&mut self.session, dt, time_ms) {
            log::debug!("{:?}", event);
        }

        let fps = if self.session.settings.show_fps {
            self.driver.fps()
        } else {
            0
        };
        serde_json::to_string(&self.session.snapshot(fps)).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }

    /// Switch color theme and persist the choice. Unknown names are ignored.
    pub fn set_theme(&mut self, name: &str) -> bool {
        let Some(theme) = Theme::from_str(name) else {
            return false;
        };
        self.session.settings.theme = theme;
        self.session.settings.save();
        log::info!("Theme set to {}", theme.as_str());
        true
    }

    pub fn toggle_fps(&mut self) {
        self.session.settings.show_fps = !self.session.settings.show_fps;
        self.session.settings.save();
    }

    pub fn high_scores(&self) -> String {
        serde_json::to_string(self.session.high_scores()).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
