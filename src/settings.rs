//! Tutor settings and preferences
//!
//! Persisted separately from session progress, under its own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::{AUTO_ADVANCE_MS, LEVEL_UP_POPUP_MS};
use crate::persistence::{KeyValueStore, StoreError};

/// Tutor settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Practice ===
    /// Accept the literal answer "0" for every problem (testing only)
    pub debug_accept_zero: bool,
    /// Delay before a correctly answered problem is replaced (ms)
    pub auto_advance_ms: u32,
    /// How long the level-up popup is shown (ms)
    pub level_up_popup_ms: u32,

    // === Display ===
    /// Draw the operand arrows next to the problem
    pub show_visualization: bool,

    // === Narration ===
    /// Offer read-aloud of concept cards
    pub narration_enabled: bool,
    /// Speech rate (1.0 = normal)
    pub narration_rate: f32,
    /// Speech pitch (1.0 = normal)
    pub narration_pitch: f32,
    /// Speech volume (0.0 - 1.0)
    pub narration_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_accept_zero: false,
            auto_advance_ms: AUTO_ADVANCE_MS,
            level_up_popup_ms: LEVEL_UP_POPUP_MS,

            show_visualization: true,

            // Slightly slower than normal speech
            narration_enabled: true,
            narration_rate: 0.9,
            narration_pitch: 1.0,
            narration_volume: 0.8,
        }
    }
}

impl Settings {
    /// Settings with the "0" answer override switched on
    pub fn debug() -> Self {
        Self {
            debug_accept_zero: true,
            ..Self::default()
        }
    }

    /// Clamp values a hand-edited store could have pushed out of range
    pub fn sanitized(mut self) -> Self {
        self.narration_rate = self.narration_rate.clamp(0.1, 10.0);
        self.narration_pitch = self.narration_pitch.clamp(0.0, 2.0);
        self.narration_volume = self.narration_volume.clamp(0.0, 1.0);
        self
    }

    /// Storage key
    const STORAGE_KEY: &'static str = "vt2d_settings";

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_debug_override_off_by_default() {
        assert!(!Settings::default().debug_accept_zero);
        assert!(Settings::debug().debug_accept_zero);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            auto_advance_ms: 800,
            show_visualization: false,
            ..Settings::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_corrupt_values() {
        let mut store = MemoryStore::new();
        store
            .set("vt2d_settings", r#"{"narration_volume": 4.0}"#.to_string())
            .unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded.narration_volume, 1.0);
        assert_eq!(loaded.auto_advance_ms, 1500);

        store.set("vt2d_settings", "{not json".to_string()).unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
