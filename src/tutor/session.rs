//! The practice session
//!
//! Owns all mutable tutor state and the RNG. Every operation runs to
//! completion on `&mut self`, so one user action is one transition.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::concept::{self, ConceptKey, ConceptSummary};
use super::economy::{Economy, Purchase, PurchaseOutcome, StoreItem};
use super::problem::Problem;
use super::progression::Progression;
use crate::persistence::{KeyValueStore, SessionSnapshot, StoreError};
use crate::settings::Settings;
use crate::stats::AttemptStats;

/// Answer text accepted for any problem while `debug_accept_zero` is on
pub const DEBUG_OVERRIDE_ANSWER: &str = "0";

/// Outcome of checking one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCheck {
    pub correct: bool,
    pub canonical_answer: String,
}

/// Rewards for one correct answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reward {
    pub coin_reward: u64,
    pub xp_gained: f64,
    pub leveled_up: bool,
    pub new_level: Option<u32>,
    /// Extra coins from the level-up, 0 without one
    pub level_up_bonus: u64,
}

/// A checked answer plus the reward it earned, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub check: AnswerCheck,
    pub reward: Option<Reward>,
}

/// Header/XP-bar numbers for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub level: u32,
    pub xp_in_level: f64,
    pub xp_required: u64,
    pub progress_percent: f64,
    pub coins: u64,
    pub streak: u32,
    pub total: u32,
    pub correct: u32,
    pub accuracy_percent: f64,
    pub xp_boost_percent: u32,
    pub coin_boost_percent: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub stats: AttemptStats,
    pub progression: Progression,
    pub economy: Economy,
    rng: Pcg32,
}

impl Session {
    /// Fresh session with a seeded RNG
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::from_snapshot(SessionSnapshot::default(), seed, settings)
    }

    pub fn from_snapshot(snapshot: SessionSnapshot, seed: u64, settings: Settings) -> Self {
        Self {
            settings,
            stats: snapshot.stats,
            progression: snapshot.progression,
            economy: snapshot.economy,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Resume from persisted state (defaults for anything missing)
    pub fn restore(store: &dyn KeyValueStore, seed: u64, settings: Settings) -> Self {
        Self::from_snapshot(SessionSnapshot::load(store), seed, settings)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stats: self.stats,
            progression: self.progression.clone(),
            economy: self.economy.clone(),
        }
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        self.snapshot().save(store)
    }

    pub fn status(&self) -> SessionStatus {
        let boosts = &self.economy.boosts;
        SessionStatus {
            level: self.progression.level,
            xp_in_level: self.progression.xp_in_level,
            xp_required: self.progression.peek_threshold(self.progression.level),
            progress_percent: self.progression.progress_percent(),
            coins: self.economy.coins,
            streak: self.stats.streak,
            total: self.stats.total,
            correct: self.stats.correct,
            accuracy_percent: self.stats.accuracy_percent(),
            xp_boost_percent: boosts.xp_boost.bonus_percent(),
            coin_boost_percent: boosts.coins_boost.bonus_percent(),
        }
    }

    pub fn list_concepts(&self) -> Vec<ConceptSummary> {
        concept::list_concepts()
    }

    /// Draw a new problem for `key`
    pub fn new_problem(&mut self, key: ConceptKey) -> Problem {
        concept::concept(key).generate(&mut self.rng)
    }

    /// Draw a new problem by concept name; `None` for an unknown name
    pub fn new_problem_named(&mut self, name: &str) -> Option<Problem> {
        ConceptKey::from_str(name).map(|key| self.new_problem(key))
    }

    /// Check `text` against `problem` without touching any state
    pub fn check_answer(&self, problem: &Problem, text: &str) -> AnswerCheck {
        let overridden = self.settings.debug_accept_zero && text == DEBUG_OVERRIDE_ANSWER;
        AnswerCheck {
            correct: overridden || problem.verify(text),
            canonical_answer: problem.canonical_answer(),
        }
    }

    /// Grant XP and coins for a correct answer, resolving any level-up
    pub fn on_correct_answer(&mut self) -> Reward {
        self.stats.record(true);

        let award = self.economy.award_for_correct_answer(&mut self.rng);
        let level_up = self.progression.apply_xp(award.xp);
        let level_up_bonus = match level_up {
            Some(event) => self
                .economy
                .award_for_level_up(event.previous_level, &mut self.rng),
            None => 0,
        };

        Reward {
            coin_reward: award.coins,
            xp_gained: award.xp,
            leveled_up: level_up.is_some(),
            new_level: level_up.map(|event| event.new_level),
            level_up_bonus,
        }
    }

    pub fn on_incorrect_answer(&mut self) {
        self.stats.record(false);
    }

    /// Check an answer and apply the matching bookkeeping
    pub fn submit(&mut self, problem: &Problem, text: &str) -> Submission {
        let check = self.check_answer(problem, text);
        let reward = if check.correct {
            Some(self.on_correct_answer())
        } else {
            self.on_incorrect_answer();
            None
        };
        Submission { check, reward }
    }

    pub fn purchase(&mut self, purchase: &Purchase) -> PurchaseOutcome {
        self.economy.purchase(purchase)
    }

    pub fn store_items(&self) -> Vec<StoreItem> {
        self.economy.store_items()
    }

    /// Back to level 1 with no coins, boosts, items or stats
    pub fn reset_all(&mut self) {
        let fresh = SessionSnapshot::default();
        self.stats = fresh.stats;
        self.progression = fresh.progression;
        self.economy = fresh.economy;
        log::info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::economy::BoostKind;

    #[test]
    fn test_debug_override_is_gated() {
        let mut session = Session::new(1, Settings::default());
        let problem = session.new_problem(ConceptKey::Magnitude);
        let wrong = if problem.verify("0") { "-1" } else { "0" };
        assert!(!session.check_answer(&problem, wrong).correct);

        session.settings = Settings::debug();
        for def in &crate::tutor::CONCEPTS {
            let problem = session.new_problem(def.key);
            assert!(session.check_answer(&problem, "0").correct);
            // Only the exact text is overridden
            assert_eq!(session.check_answer(&problem, " 0").correct, problem.verify(" 0"));
        }
    }

    #[test]
    fn test_check_reports_canonical_answer() {
        let mut session = Session::new(2, Settings::default());
        let problem = session.new_problem(ConceptKey::Unit);
        let check = session.check_answer(&problem, "nonsense");
        assert!(!check.correct);
        assert_eq!(check.canonical_answer, problem.canonical_answer());
    }

    #[test]
    fn test_correct_answer_rewards() {
        let mut session = Session::new(3, Settings::default());
        let reward = session.on_correct_answer();
        assert!((20..=50).contains(&reward.coin_reward));
        assert_eq!(reward.xp_gained, 25.0);
        assert!(!reward.leveled_up);
        assert_eq!(reward.new_level, None);
        assert_eq!(session.economy.coins, reward.coin_reward);
        assert_eq!(session.progression.xp_in_level, 25.0);
        assert_eq!(session.stats.streak, 1);
    }

    #[test]
    fn test_fourth_correct_answer_levels_up() {
        let mut session = Session::new(4, Settings::default());
        let mut coins = 0;
        for _ in 0..3 {
            coins += session.on_correct_answer().coin_reward;
        }
        let reward = session.on_correct_answer();
        assert!(reward.leveled_up);
        assert_eq!(reward.new_level, Some(2));
        assert!((100..=200).contains(&reward.level_up_bonus));
        coins += reward.coin_reward + reward.level_up_bonus;
        assert_eq!(session.economy.coins, coins);
        assert_eq!(session.progression.level, 2);
        assert_eq!(session.progression.xp_in_level, 0.0);
    }

    #[test]
    fn test_submit_tracks_stats() {
        let mut session = Session::new(5, Settings::default());
        let problem = session.new_problem(ConceptKey::Dot);
        let right = session.submit(&problem, &problem.canonical_answer());
        assert!(right.check.correct);
        assert!(right.reward.is_some());

        let wrong = session.submit(&problem, "not a number");
        assert!(!wrong.check.correct);
        assert!(wrong.reward.is_none());
        assert_eq!(
            session.stats,
            AttemptStats {
                streak: 0,
                total: 2,
                correct: 1
            }
        );
    }

    #[test]
    fn test_status_after_purchase() {
        let mut session = Session::new(9, Settings::default());
        session.economy.coins = 200;
        assert!(session.purchase(&Purchase::Boost { kind: BoostKind::Coins }).is_success());
        let status = session.status();
        assert_eq!(status.coins, 50);
        assert_eq!(status.coin_boost_percent, 5);
        assert_eq!(status.xp_boost_percent, 0);
        assert_eq!(status.xp_required, 100);
        assert_eq!(status.progress_percent, 0.0);
    }

    #[test]
    fn test_progress_survives_restore() {
        use crate::persistence::MemoryStore;

        let mut store = MemoryStore::new();
        let mut session = Session::new(10, Settings::default());
        for def in &crate::tutor::CONCEPTS {
            let problem = session.new_problem(def.key);
            assert!(session.submit(&problem, &problem.canonical_answer()).check.correct);
        }
        assert!(session.purchase(&Purchase::Boost { kind: BoostKind::Xp }).is_success());
        session.persist(&mut store).unwrap();

        let restored = Session::restore(&store, 11, Settings::default());
        assert_eq!(restored.snapshot(), session.snapshot());
        assert_eq!(restored.status(), session.status());
        assert_eq!(restored.progression.level, 2);
        assert_eq!(restored.economy.boosts.xp_boost.multiplier(), 1.05);
    }

    #[test]
    fn test_unknown_concept_name() {
        let mut session = Session::new(6, Settings::default());
        assert!(session.new_problem_named("cross").is_none());
        assert_eq!(
            session.new_problem_named("angle").map(|p| p.concept),
            Some(ConceptKey::Angle)
        );
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut session = Session::new(7, Settings::default());
        session.economy.coins = 5000;
        session.purchase(&Purchase::Boost { kind: BoostKind::Xp });
        session.purchase(&Purchase::Item {
            name: "Custom Themes".to_string(),
            price: 200,
        });
        for _ in 0..6 {
            session.on_correct_answer();
        }
        session.on_incorrect_answer();

        session.reset_all();
        assert_eq!(session.snapshot(), SessionSnapshot::default());
        assert_eq!(session.economy.boosts.xp_boost.level(), 0);
        assert!(session.economy.owned_items.is_empty());
    }
}
