//! Session snapshot: the persisted state under its fixed keys

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};

use super::{KeyValueStore, StoreError};
use crate::stats::AttemptStats;
use crate::tutor::economy::{ActiveBoosts, Economy};
use crate::tutor::progression::Progression;

pub const KEY_STREAK: &str = "vt2d_streak";
pub const KEY_TOTAL: &str = "vt2d_total";
pub const KEY_CORRECT: &str = "vt2d_correct";
pub const KEY_LEVEL: &str = "vt2d_level";
pub const KEY_XP_CURRENT: &str = "vt2d_xp_current";
pub const KEY_XP_REQUIREMENTS: &str = "vt2d_xp_requirements";
pub const KEY_COINS: &str = "vt2d_coins";
pub const KEY_OWNED_ITEMS: &str = "vt2d_owned_items";
pub const KEY_ACTIVE_BOOSTS: &str = "vt2d_active_boosts";

/// Everything that survives a page reload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub stats: AttemptStats,
    pub progression: Progression,
    pub economy: Economy,
}

/// Read one key, substituting `default` when it is missing or unreadable
fn read_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let Some(raw) = store.get(key) else {
        return default;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Stored {} is corrupt ({}), using default", key, e);
            default
        }
    }
}

fn entry<'k, T: Serialize + ?Sized>(
    key: &'k str,
    value: &T,
) -> Result<(&'k str, String), StoreError> {
    Ok((key, serde_json::to_string(value)?))
}

impl SessionSnapshot {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let stats = AttemptStats {
            streak: read_or(store, KEY_STREAK, 0),
            total: read_or(store, KEY_TOTAL, 0),
            correct: read_or(store, KEY_CORRECT, 0),
        };

        let progression = Progression::from_parts(
            read_or(store, KEY_LEVEL, 1),
            read_or(store, KEY_XP_CURRENT, 0.0),
            read_or(store, KEY_XP_REQUIREMENTS, BTreeMap::new()),
        );

        let economy = Economy {
            coins: read_or(store, KEY_COINS, 0),
            boosts: read_or(store, KEY_ACTIVE_BOOSTS, ActiveBoosts::default()),
            owned_items: read_or::<Vec<String>>(store, KEY_OWNED_ITEMS, Vec::new())
                .into_iter()
                .collect::<BTreeSet<String>>(),
        };

        log::info!(
            "Loaded session: level {}, {} coins, {} answers checked",
            progression.level,
            economy.coins,
            stats.total
        );

        Self {
            stats,
            progression,
            economy,
        }
    }

    /// Write every key as one batch
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let entries = vec![
            entry(KEY_STREAK, &self.stats.streak)?,
            entry(KEY_TOTAL, &self.stats.total)?,
            entry(KEY_CORRECT, &self.stats.correct)?,
            entry(KEY_LEVEL, &self.progression.level)?,
            entry(KEY_XP_CURRENT, &self.progression.xp_in_level)?,
            entry(KEY_XP_REQUIREMENTS, self.progression.thresholds())?,
            entry(KEY_COINS, &self.economy.coins)?,
            entry(KEY_OWNED_ITEMS, &self.economy.owned_items)?,
            entry(KEY_ACTIVE_BOOSTS, &self.economy.boosts)?,
        ];
        store.set_many(entries)
    }
}
