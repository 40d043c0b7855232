//! Attempt statistics
//!
//! Counts every checked answer; the streak breaks on the first miss.

use serde::{Deserialize, Serialize};

/// Streak and accuracy counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttemptStats {
    /// Correct answers in a row
    pub streak: u32,
    /// Answers checked
    pub total: u32,
    /// Answers that were correct
    pub correct: u32,
}

impl AttemptStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one checked answer
    pub fn record(&mut self, correct: bool) {
        self.total = self.total.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
    }

    /// Share of correct answers in percent (0 before the first attempt)
    pub fn accuracy_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}
