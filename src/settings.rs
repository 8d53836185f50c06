//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Player preferences. `hard` is the difficulty toggle the simulation reads
/// at pipe spawn time; the rest is presentation only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Hard mode: smaller pipe gaps
    pub hard: bool,
    /// Show the FPS counter
    pub show_fps: bool,
    /// Minimize shake and flash effects
    pub reduced_motion: bool,
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pidgey_flap_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(settings) = serde_json::from_str(&json)
        {
            log::info!("loaded settings from LocalStorage");
            return settings;
        }

        log::info!("using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("settings saved");
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
    fn defaults_start_in_normal_mode() {
        let settings = Settings::default();
        assert!(!settings.hard);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings {
            hard: true,
            show_fps: true,
            reduced_motion: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.hard);
        assert!(back.show_fps);
    }
}
