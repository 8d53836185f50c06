//! Best score ledger
//!
//! A single non-negative integer, read once at startup and written only when
//! a run ends with a new high. Persisted to LocalStorage on the web, held in
//! memory on native.

use serde::{Deserialize, Serialize};

/// The persisted best score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub best: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pidgey_flap_best";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Commit a finished run. Updates and persists only on a new high;
    /// returns whether the best changed.
    pub fn commit_run(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.save();
        true
    }

    /// Load the best score from LocalStorage (WASM only); 0 if absent or
    /// unreadable.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(best) = serde_json::from_str::<BestScore>(&json)
        {
            log::info!("loaded best score {}", best.best);
            return best;
        }

        log::info!("no stored best score, starting at 0");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("best score saved ({})", self.best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
