//! Coins, boosts and the item store
//!
//! A boost's multiplier is derived from its level, so the two can never
//! drift apart. Spends are validated against the balance at the moment they
//! are applied and leave the state untouched when denied.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::consts::{
    BASE_XP_PER_CORRECT, BOOST_BASE_PRICE, BOOST_PRICE_GROWTH, BOOST_STEP, CORRECT_COIN_RANGE,
    LEVEL_UP_COIN_RANGE,
};

/// Which reward a boost multiplies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostKind {
    Xp,
    Coins,
}

impl BoostKind {
    pub fn name(&self) -> &'static str {
        match self {
            BoostKind::Xp => "XP Boost",
            BoostKind::Coins => "Coins Boost",
        }
    }

    fn reward_label(&self) -> &'static str {
        match self {
            BoostKind::Xp => "XP",
            BoostKind::Coins => "Coins",
        }
    }
}

/// Persisted shape of a boost
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BoostRecord {
    level: u32,
    multiplier: f64,
}

/// A stacking percentage boost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "BoostRecord", from = "BoostRecord")]
pub struct Boost {
    level: u32,
}

impl From<Boost> for BoostRecord {
    fn from(boost: Boost) -> Self {
        Self {
            level: boost.level,
            multiplier: boost.multiplier(),
        }
    }
}

impl From<BoostRecord> for Boost {
    fn from(record: BoostRecord) -> Self {
        let boost = Boost::with_level(record.level);
        if (boost.multiplier() - record.multiplier).abs() > 1e-6 {
            log::warn!(
                "Stored boost multiplier {} does not match level {}, using {}",
                record.multiplier,
                record.level,
                boost.multiplier()
            );
        }
        boost
    }
}

impl Boost {
    pub fn with_level(level: u32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// `1 + 0.05 × level`
    pub fn multiplier(&self) -> f64 {
        1.0 + BOOST_STEP * self.level as f64
    }

    /// Bonus over the base reward, in whole percent
    pub fn bonus_percent(&self) -> u32 {
        ((self.multiplier() - 1.0) * 100.0).round() as u32
    }

    pub fn is_active(&self) -> bool {
        self.level > 0
    }

    /// Cost of the next level: `floor(150 × 1.1^level)`
    pub fn next_price(&self) -> u64 {
        (BOOST_BASE_PRICE * BOOST_PRICE_GROWTH.powf(self.level as f64)).floor() as u64
    }
}

/// The two boost slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBoosts {
    #[serde(default)]
    pub xp_boost: Boost,
    #[serde(default)]
    pub coins_boost: Boost,
}

impl ActiveBoosts {
    pub fn get(&self, kind: BoostKind) -> Boost {
        match kind {
            BoostKind::Xp => self.xp_boost,
            BoostKind::Coins => self.coins_boost,
        }
    }

    fn get_mut(&mut self, kind: BoostKind) -> &mut Boost {
        match kind {
            BoostKind::Xp => &mut self.xp_boost,
            BoostKind::Coins => &mut self.coins_boost,
        }
    }

    pub fn any_active(&self) -> bool {
        self.xp_boost.is_active() || self.coins_boost.is_active()
    }
}

/// Something the player can buy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Purchase {
    Boost { kind: BoostKind },
    Item { name: String, price: u64 },
}

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased { price: u64 },
    InsufficientCoins { price: u64, coins: u64 },
    AlreadyOwned,
}

impl PurchaseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

/// A fixed, non-boost store item
#[derive(Debug, Clone, Copy)]
pub struct CatalogItem {
    pub name: &'static str,
    pub description: &'static str,
    pub price: u64,
}

pub const ITEM_CATALOG: [CatalogItem; 4] = [
    CatalogItem {
        name: "Custom Themes",
        description: "Unlock new color schemes",
        price: 200,
    },
    CatalogItem {
        name: "Advanced Stats",
        description: "Detailed progress analytics",
        price: 400,
    },
    CatalogItem {
        name: "Study Reminders",
        description: "Daily practice notifications",
        price: 150,
    },
    CatalogItem {
        name: "Premium Support",
        description: "Priority help & feedback",
        price: 1000,
    },
];

/// A store row as the store screen lists it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreItem {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub owned: bool,
    pub affordable: bool,
    pub purchase: Purchase,
}

/// Rewards granted for one correct answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectAward {
    pub xp: f64,
    pub coins: u64,
}

/// Coin balance, boosts and owned items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub coins: u64,
    pub boosts: ActiveBoosts,
    pub owned_items: BTreeSet<String>,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    /// XP and coins for a correct answer. Coins are credited here; the XP is
    /// for the caller to feed into progression.
    pub fn award_for_correct_answer<R: Rng>(&mut self, rng: &mut R) -> CorrectAward {
        let xp = BASE_XP_PER_CORRECT * self.boosts.xp_boost.multiplier();
        let base = rng.random_range(CORRECT_COIN_RANGE);
        let coins = (base as f64 * self.boosts.coins_boost.multiplier()).floor() as u64;
        self.coins = self.coins.saturating_add(coins);
        CorrectAward { xp, coins }
    }

    /// Bonus coins for leaving `previous_level`
    pub fn award_for_level_up<R: Rng>(&mut self, previous_level: u32, rng: &mut R) -> u64 {
        let base = rng.random_range(LEVEL_UP_COIN_RANGE) as u64 * previous_level as u64;
        let coins = (base as f64 * self.boosts.coins_boost.multiplier()).floor() as u64;
        self.coins = self.coins.saturating_add(coins);
        coins
    }

    pub fn boost_price(&self, kind: BoostKind) -> u64 {
        self.boosts.get(kind).next_price()
    }

    fn spend(&mut self, price: u64) -> Result<(), PurchaseOutcome> {
        if self.coins < price {
            return Err(PurchaseOutcome::InsufficientCoins {
                price,
                coins: self.coins,
            });
        }
        self.coins -= price;
        Ok(())
    }

    /// Buy the next level of a boost
    pub fn purchase_boost(&mut self, kind: BoostKind) -> PurchaseOutcome {
        let price = self.boost_price(kind);
        if let Err(denied) = self.spend(price) {
            log::info!("{} denied: costs {}, have {}", kind.name(), price, self.coins);
            return denied;
        }
        let boost = self.boosts.get_mut(kind);
        *boost = Boost::with_level(boost.level.saturating_add(1));
        log::info!("{} bought for {} (now level {})", kind.name(), price, boost.level);
        PurchaseOutcome::Purchased { price }
    }

    /// Buy a one-off item. Owning it already denies the purchase.
    pub fn purchase_item(&mut self, name: &str, price: u64) -> PurchaseOutcome {
        if self.owns(name) {
            return PurchaseOutcome::AlreadyOwned;
        }
        if let Err(denied) = self.spend(price) {
            log::info!("{} denied: costs {}, have {}", name, price, self.coins);
            return denied;
        }
        self.owned_items.insert(name.to_string());
        log::info!("{} bought for {}", name, price);
        PurchaseOutcome::Purchased { price }
    }

    pub fn purchase(&mut self, purchase: &Purchase) -> PurchaseOutcome {
        match purchase {
            Purchase::Boost { kind } => self.purchase_boost(*kind),
            Purchase::Item { name, price } => self.purchase_item(name, *price),
        }
    }

    pub fn owns(&self, name: &str) -> bool {
        self.owned_items.contains(name)
    }

    /// Boosts at their current price followed by the item catalog
    pub fn store_items(&self) -> Vec<StoreItem> {
        let boosts = [BoostKind::Xp, BoostKind::Coins].into_iter().map(|kind| {
            let boost = self.boosts.get(kind);
            let price = boost.next_price();
            StoreItem {
                name: kind.name().to_string(),
                description: format!(
                    "+{}% {} (Level {})",
                    (BOOST_STEP * 100.0).round(),
                    kind.reward_label(),
                    boost.level()
                ),
                price,
                owned: false,
                affordable: self.coins >= price,
                purchase: Purchase::Boost { kind },
            }
        });
        let items = ITEM_CATALOG.iter().map(|item| StoreItem {
            name: item.name.to_string(),
            description: item.description.to_string(),
            price: item.price,
            owned: self.owns(item.name),
            affordable: self.coins >= item.price,
            purchase: Purchase::Item {
                name: item.name.to_string(),
                price: item.price,
            },
        });
        boosts.chain(items).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_boost_multiplier_and_price() {
        let boost = Boost::default();
        assert_eq!(boost.multiplier(), 1.0);
        assert_eq!(boost.next_price(), 150);
        let prices: Vec<u64> = (0..6).map(|l| Boost::with_level(l).next_price()).collect();
        assert_eq!(prices, [150, 165, 181, 199, 219, 241]);
        assert_eq!(Boost::with_level(3).bonus_percent(), 15);
    }

    #[test]
    fn test_purchase_boost_success() {
        let mut economy = Economy {
            coins: 500,
            ..Default::default()
        };
        let before = economy.boosts.xp_boost;
        let outcome = economy.purchase_boost(BoostKind::Xp);
        assert_eq!(outcome, PurchaseOutcome::Purchased { price: 150 });
        assert_eq!(economy.coins, 350);
        let after = economy.boosts.xp_boost;
        assert_eq!(after.level(), before.level() + 1);
        assert!((after.multiplier() - before.multiplier() - 0.05).abs() < 1e-12);
        assert_eq!(economy.boosts.coins_boost, Boost::default());

        assert!(economy.purchase_boost(BoostKind::Xp).is_success());
        assert_eq!(economy.coins, 350 - 165);
    }

    #[test]
    fn test_purchase_boost_insufficient_coins() {
        let mut economy = Economy {
            coins: 149,
            ..Default::default()
        };
        let snapshot = economy.clone();
        let outcome = economy.purchase_boost(BoostKind::Coins);
        assert_eq!(
            outcome,
            PurchaseOutcome::InsufficientCoins {
                price: 150,
                coins: 149
            }
        );
        assert!(!outcome.is_success());
        assert_eq!(economy, snapshot);
    }

    #[test]
    fn test_purchase_item_once() {
        let mut economy = Economy {
            coins: 1000,
            ..Default::default()
        };
        assert!(economy.purchase_item("Custom Themes", 200).is_success());
        assert_eq!(economy.coins, 800);
        assert!(economy.owns("Custom Themes"));
        assert_eq!(
            economy.purchase_item("Custom Themes", 200),
            PurchaseOutcome::AlreadyOwned
        );
        assert_eq!(economy.coins, 800);
        assert!(!economy.purchase_item("Premium Support", 1000).is_success());
        assert_eq!(economy.coins, 800);
    }

    #[test]
    fn test_correct_answer_rewards_with_boosts() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut economy = Economy {
            boosts: ActiveBoosts {
                xp_boost: Boost::with_level(2),
                coins_boost: Boost::with_level(4),
            },
            ..Default::default()
        };
        for _ in 0..100 {
            let before = economy.coins;
            let award = economy.award_for_correct_answer(&mut rng);
            assert!((award.xp - 27.5).abs() < 1e-9);
            assert!((24..=60).contains(&award.coins));
            assert_eq!(economy.coins, before + award.coins);
        }
    }

    #[test]
    fn test_level_up_bonus_scales_with_level() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut economy = Economy::new();
        for level in 1..10u32 {
            let bonus = economy.award_for_level_up(level, &mut rng);
            assert!(bonus >= 100 * level as u64 && bonus <= 200 * level as u64);
        }
    }

    #[test]
    fn test_store_items_listing() {
        let mut economy = Economy {
            coins: 300,
            ..Default::default()
        };
        economy.purchase_item("Study Reminders", 150);
        let items = economy.store_items();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].name, "XP Boost");
        assert_eq!(items[0].description, "+5% XP (Level 0)");
        assert_eq!(items[1].purchase, Purchase::Boost { kind: BoostKind::Coins });
        let reminders = items.iter().find(|i| i.name == "Study Reminders").unwrap();
        assert!(reminders.owned);
        let support = items.iter().find(|i| i.name == "Premium Support").unwrap();
        assert!(!support.affordable);
    }

    #[test]
    fn test_boosts_serialize_with_multiplier() {
        let boosts = ActiveBoosts {
            xp_boost: Boost::with_level(1),
            coins_boost: Boost::default(),
        };
        let json = serde_json::to_value(boosts).unwrap();
        assert_eq!(json["xpBoost"]["level"], 1);
        assert_eq!(json["xpBoost"]["multiplier"], 1.05);
        assert_eq!(json["coinsBoost"]["multiplier"], 1.0);

        let restored: ActiveBoosts =
            serde_json::from_str(r#"{"xpBoost":{"level":2,"multiplier":9.0}}"#).unwrap();
        assert_eq!(restored.xp_boost.level(), 2);
        assert!((restored.xp_boost.multiplier() - 1.1).abs() < 1e-12);
        assert_eq!(restored.coins_boost, Boost::default());
    }
}
