//! Player preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    HighContrast,
}

/// Named colors handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub paddle: &'static str,
    pub ball: &'static str,
    pub fireball: &'static str,
    pub brick: &'static str,
    pub power_up: &'static str,
    pub text: &'static str,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Dark => "Dark",
            Theme::HighContrast => "High Contrast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "dark" => Some(Theme::Dark),
            "high-contrast" | "high_contrast" | "contrast" => Some(Theme::HighContrast),
            _ => None,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Classic => Palette {
                background: "#eeeeee",
                paddle: "#0095dd",
                ball: "#ffffff",
                fireball: "#ff8800",
                brick: "#ff5555",
                power_up: "#33cc66",
                text: "#222222",
            },
            Theme::Dark => Palette {
                background: "#111122",
                paddle: "#44aaff",
                ball: "#f0f0f0",
                fireball: "#ff6a00",
                brick: "#d94c4c",
                power_up: "#55dd88",
                text: "#e0e0e0",
            },
            Theme::HighContrast => Palette {
                background: "#000000",
                paddle: "#ffffff",
                ball: "#ffff00",
                fireball: "#ff0000",
                brick: "#00ffff",
                power_up: "#00ff00",
                text: "#ffffff",
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Show FPS counter
    pub show_fps: bool,
    /// Start with the debug overlay on
    pub debug_overlay: bool,
    /// Pause when the tab is hidden
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Classic,
            show_fps: true,
            debug_overlay: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str() {
        assert_eq!(Theme::from_str("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("contrast"), Some(Theme::HighContrast));
        assert_eq!(Theme::from_str("sepia"), None);
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "theme": "Dark" }"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.show_fps);
        assert_eq!(settings.palette(), Theme::Dark.palette());
    }
}
