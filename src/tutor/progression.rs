//! Level and XP progression
//!
//! XP accumulates within the current level. Crossing the level's threshold
//! advances exactly one level and resets XP to zero; anything past the
//! threshold is dropped, even if it would cover the next level too.
//! Progress stops at `MAX_LEVEL`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::consts::{
    FIRST_LEVEL_THRESHOLD, MAX_LEVEL, THRESHOLD_BASE_GROWTH, THRESHOLD_GROWTH_STEP,
    THRESHOLD_GROWTH_WRAP,
};

/// Reported once when a level threshold is crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub previous_level: u32,
    pub new_level: u32,
}

/// Growth of the threshold going into `level` (between 10% and 25%)
pub fn growth_rate(level: u32) -> f64 {
    THRESHOLD_BASE_GROWTH + ((level as f64 * THRESHOLD_GROWTH_STEP) % THRESHOLD_GROWTH_WRAP)
}

/// Player progression: level, XP inside the level, and the threshold cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp_in_level: f64,
    /// Sparse level -> required XP cache; level 1 is always present
    thresholds: BTreeMap<u32, u64>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            xp_in_level: 0.0,
            thresholds: BTreeMap::from([(1, FIRST_LEVEL_THRESHOLD)]),
        }
    }

    /// Rebuild from persisted values, repairing anything out of range
    pub fn from_parts(level: u32, xp_in_level: f64, thresholds: BTreeMap<u32, u64>) -> Self {
        let mut thresholds: BTreeMap<u32, u64> = thresholds
            .into_iter()
            .filter(|&(lvl, xp)| (1..=MAX_LEVEL).contains(&lvl) && xp > 0)
            .collect();
        thresholds.entry(1).or_insert(FIRST_LEVEL_THRESHOLD);

        let clamped_level = level.clamp(1, MAX_LEVEL);
        if clamped_level != level {
            log::warn!("Stored level {} is out of range, using {}", level, clamped_level);
        }
        let xp_in_level = if xp_in_level.is_finite() && xp_in_level >= 0.0 {
            xp_in_level
        } else {
            log::warn!("Stored XP {} is invalid, using 0", xp_in_level);
            0.0
        };

        let mut progression = Self {
            level: clamped_level,
            xp_in_level,
            thresholds,
        };
        let required = progression.peek_threshold(clamped_level);
        if progression.xp_in_level >= required as f64 {
            log::warn!(
                "Stored XP {} already fills level {} ({}), using 0",
                progression.xp_in_level,
                clamped_level,
                required
            );
            progression.xp_in_level = 0.0;
        }
        progression
    }

    /// Cached thresholds, for persistence
    pub fn thresholds(&self) -> &BTreeMap<u32, u64> {
        &self.thresholds
    }

    /// Required XP for `level`, computing and caching any missing levels
    pub fn threshold(&mut self, level: u32) -> u64 {
        let level = level.clamp(1, MAX_LEVEL);
        if let Some(&xp) = self.thresholds.get(&level) {
            return xp;
        }
        let (mut lvl, mut xp) = self.nearest_cached_below(level);
        while lvl < level {
            lvl += 1;
            xp = self.thresholds.get(&lvl).copied().unwrap_or_else(|| next_threshold(xp, lvl));
            self.thresholds.insert(lvl, xp);
        }
        xp
    }

    /// Required XP for `level` without touching the cache
    pub fn peek_threshold(&self, level: u32) -> u64 {
        let level = level.clamp(1, MAX_LEVEL);
        if let Some(&xp) = self.thresholds.get(&level) {
            return xp;
        }
        let (mut lvl, mut xp) = self.nearest_cached_below(level);
        while lvl < level {
            lvl += 1;
            xp = self.thresholds.get(&lvl).copied().unwrap_or_else(|| next_threshold(xp, lvl));
        }
        xp
    }

    fn nearest_cached_below(&self, level: u32) -> (u32, u64) {
        self.thresholds
            .range(..level)
            .next_back()
            .map(|(&lvl, &xp)| (lvl, xp))
            .unwrap_or((1, FIRST_LEVEL_THRESHOLD))
    }

    /// Required XP for the current level
    pub fn current_threshold(&mut self) -> u64 {
        self.threshold(self.level)
    }

    /// Fill of the XP bar in percent, capped at 100
    pub fn progress_percent(&self) -> f64 {
        let required = self.peek_threshold(self.level) as f64;
        (self.xp_in_level / required * 100.0).min(100.0)
    }

    /// Add XP and resolve at most one level-up
    pub fn apply_xp(&mut self, amount: f64) -> Option<LevelUp> {
        if amount.is_finite() && amount > 0.0 {
            self.xp_in_level += amount;
        }
        let required = self.current_threshold();
        if self.xp_in_level < required as f64 {
            return None;
        }
        if self.level >= MAX_LEVEL {
            self.xp_in_level = required as f64;
            return None;
        }

        let previous_level = self.level;
        self.level += 1;
        self.xp_in_level = 0.0;
        // Cache the new level's threshold as soon as it is reached
        self.current_threshold();
        log::info!("Level up: {} -> {}", previous_level, self.level);

        Some(LevelUp {
            previous_level,
            new_level: self.level,
        })
    }
}

fn next_threshold(previous: u64, level: u32) -> u64 {
    (previous as f64 * (1.0 + growth_rate(level))).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_schedule() {
        let mut p = Progression::new();
        let expected = [100, 115, 136, 165, 181, 204, 236, 280, 341, 375, 423];
        for (i, &xp) in expected.iter().enumerate() {
            assert_eq!(p.threshold(i as u32 + 1), xp, "level {}", i + 1);
        }
    }

    #[test]
    fn test_threshold_is_cached_and_idempotent() {
        let mut p = Progression::new();
        assert_eq!(p.peek_threshold(6), 204);
        assert!(!p.thresholds().contains_key(&6));
        let first = p.threshold(6);
        assert!(p.thresholds().contains_key(&6));
        assert!(p.thresholds().contains_key(&3));
        assert_eq!(p.threshold(6), first);
    }

    #[test]
    fn test_exact_threshold_levels_up() {
        let mut p = Progression::new();
        let event = p.apply_xp(100.0);
        assert_eq!(
            event,
            Some(LevelUp {
                previous_level: 1,
                new_level: 2
            })
        );
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_in_level, 0.0);
    }

    #[test]
    fn test_overflow_is_discarded() {
        // No remainder carries into the next level
        let mut p = Progression::new();
        assert!(p.apply_xp(150.0).is_some());
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_in_level, 0.0);

        // A grant covering several levels still advances only one
        assert!(p.apply_xp(10_000.0).is_some());
        assert_eq!(p.level, 3);
        assert_eq!(p.xp_in_level, 0.0);
    }

    #[test]
    fn test_below_threshold_accumulates() {
        let mut p = Progression::new();
        assert_eq!(p.apply_xp(25.0), None);
        assert_eq!(p.apply_xp(26.25), None);
        assert_eq!(p.level, 1);
        assert!((p.xp_in_level - 51.25).abs() < 1e-9);
        assert!((p.progress_percent() - 51.25).abs() < 1e-9);
    }

    #[test]
    fn test_four_correct_answers_reach_level_two() {
        let mut p = Progression::new();
        for _ in 0..3 {
            assert_eq!(p.apply_xp(25.0), None);
        }
        assert!(p.apply_xp(25.0).is_some());
        assert_eq!(p.level, 2);
    }

    #[test]
    fn test_from_parts_repairs_corruption() {
        let p = Progression::from_parts(0, f64::NAN, BTreeMap::from([(1, 0), (3, 500)]));
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_in_level, 0.0);
        assert_eq!(p.thresholds().get(&1), Some(&100));
        assert_eq!(p.thresholds().get(&3), Some(&500));
    }

    #[test]
    fn test_stored_thresholds_win_over_schedule() {
        let mut p = Progression::from_parts(4, 0.0, BTreeMap::from([(1, 100), (3, 500)]));
        assert_eq!(p.threshold(2), 115);
        assert_eq!(p.threshold(3), 500);
        assert_eq!(p.threshold(4), (500.0 * (1.0 + growth_rate(4))).floor() as u64);
    }

    #[test]
    fn test_from_parts_clamps_extreme_level() {
        let mut p = Progression::from_parts(u32::MAX, 0.0, BTreeMap::from([(u32::MAX, 1)]));
        assert_eq!(p.level, MAX_LEVEL);
        assert!(!p.thresholds().contains_key(&u32::MAX));
        // Answering at the cap neither overflows nor advances
        for _ in 0..10 {
            assert_eq!(p.apply_xp(1e300), None);
        }
        assert_eq!(p.level, MAX_LEVEL);
        assert_eq!(p.progress_percent(), 100.0);
        assert!(p.thresholds().len() <= MAX_LEVEL as usize);
    }

    #[test]
    fn test_from_parts_drops_xp_past_threshold() {
        let p = Progression::from_parts(2, 500.0, BTreeMap::new());
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_in_level, 0.0);

        let p = Progression::from_parts(2, 114.5, BTreeMap::new());
        assert_eq!(p.xp_in_level, 114.5);
    }
}
