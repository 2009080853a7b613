//! Display settings and preferences
//!
//! Persisted in LocalStorage on the web; native hosts use defaults.

use serde::{Deserialize, Serialize};

/// Display settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Debug ===
    /// Outline every collision box (Ctrl+D)
    pub show_hitboxes: bool,

    // === Visual Effects ===
    /// Draw the parallax background layers
    pub parallax: bool,
    /// Reduced motion (background layers stay still)
    pub reduced_motion: bool,

    // === HUD ===
    /// Score, high score and speed readout
    pub show_hud: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hitboxes: false,
            parallax: true,
            reduced_motion: false,
            show_hud: true,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective parallax (respects reduced_motion)
    pub fn effective_parallax(&self) -> bool {
        self.parallax && !self.reduced_motion
    }

    pub fn toggle_hitboxes(&mut self) -> bool {
        self.show_hitboxes = !self.show_hitboxes;
        log::info!("Hitbox overlay: {}", self.show_hitboxes);
        self.show_hitboxes
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "side_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
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
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"show_hitboxes": true}"#).unwrap();
        assert!(settings.show_hitboxes);
        assert!(settings.parallax);
        assert!(settings.show_hud);
    }

    #[test]
    fn test_reduced_motion_disables_parallax() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_parallax());
    }

    #[test]
    fn test_toggle_hitboxes() {
        let mut settings = Settings::default();
        assert!(settings.toggle_hitboxes());
        assert!(!settings.toggle_hitboxes());
    }
}
