//! Vector Tutor - 2D vector practice with levels, coins and boosts
//!
//! Core modules:
//! - `tutor`: Vector math, concept catalog, problem generation, answer
//!   checking, progression and economy
//! - `stats`: Attempt/streak bookkeeping
//! - `settings`: Player preferences and debug switches
//! - `persistence`: Key-value storage of session state with fallback defaults
//! - `platform`: Browser/native differences (logging, storage, seeding)

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod stats;
pub mod tutor;

pub use settings::Settings;
pub use stats::AttemptStats;
pub use tutor::{ConceptKey, Problem, Session};

/// Game balance constants
pub mod consts {
    use std::ops::RangeInclusive;

    /// XP required to leave level 1
    pub const FIRST_LEVEL_THRESHOLD: u64 = 100;
    /// Threshold growth is `BASE + (level × STEP mod WRAP)`, i.e. 10-25%
    pub const THRESHOLD_BASE_GROWTH: f64 = 0.10;
    pub const THRESHOLD_GROWTH_STEP: f64 = 0.03;
    pub const THRESHOLD_GROWTH_WRAP: f64 = 0.15;
    /// Highest reachable level; stored levels above it are clamped
    pub const MAX_LEVEL: u32 = 200;

    /// XP for a correct answer before the XP boost
    pub const BASE_XP_PER_CORRECT: f64 = 25.0;
    /// Coins for a correct answer before the coin boost
    pub const CORRECT_COIN_RANGE: RangeInclusive<u32> = 20..=50;
    /// Level-up bonus per previous level, before the coin boost
    pub const LEVEL_UP_COIN_RANGE: RangeInclusive<u32> = 100..=200;

    /// Multiplier gained per boost level
    pub const BOOST_STEP: f64 = 0.05;
    /// Boost price is `BASE × GROWTH^level`, floored
    pub const BOOST_BASE_PRICE: f64 = 150.0;
    pub const BOOST_PRICE_GROWTH: f64 = 1.1;

    /// Delay before the next problem replaces a correctly answered one
    pub const AUTO_ADVANCE_MS: u32 = 1500;
    /// How long the level-up popup stays up
    pub const LEVEL_UP_POPUP_MS: u32 = 2000;

    /// Half-extent of the visible plot, in vector units
    pub const WORLD_HALF_EXTENT: f64 = 8.0;
    /// Plot width in pixels (the height follows the 4:3 viewport)
    pub const VIEWPORT_WIDTH: f64 = 480.0;
    /// Arrowhead length and edge margin, in pixels
    pub const ARROWHEAD_SIZE: f64 = 12.0;
    pub const ARROW_MARGIN: f64 = 8.0;
}
