//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend (console on web, env_logger on native)
//! - Storage (LocalStorage on web, JSON file or memory on native)
//! - Session seeding

use crate::persistence::{KeyValueStore, MemoryStore};

/// Install the logger for this platform. Safe to call more than once.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::try_init();
    }
}

/// Fresh seed for a new session's RNG
pub fn random_seed() -> u64 {
    rand::random()
}

/// LocalStorage, or memory when the browser denies access
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn KeyValueStore> {
    match crate::persistence::LocalStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("LocalStorage unavailable, progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

/// JSON save file at `save_path`, or memory without one
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store(save_path: Option<&std::path::Path>) -> Box<dyn KeyValueStore> {
    let Some(path) = save_path else {
        return Box::new(MemoryStore::new());
    };
    match crate::persistence::JsonFileStore::open(path) {
        Ok(store) => {
            log::info!("Saving progress to {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("Cannot open {} ({}), progress will not be saved", path.display(), e);
            Box::new(MemoryStore::new())
        }
    }
}
