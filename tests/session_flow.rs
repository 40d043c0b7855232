use vector_tutor::persistence::{KeyValueStore, MemoryStore};
use vector_tutor::tutor::{BoostKind, CONCEPTS, Purchase, PurchaseOutcome};
use vector_tutor::{ConceptKey, Session, Settings};

fn answer_correctly(session: &mut Session, key: ConceptKey) {
    let problem = session.new_problem(key);
    let submission = session.submit(&problem, &problem.canonical_answer());
    assert!(submission.check.correct, "{}", problem.prompt);
    assert!(submission.reward.is_some());
}

#[test]
fn practice_buy_and_resume() {
    let mut store = MemoryStore::new();
    Settings::default().save(&mut store).unwrap();

    let mut session = Session::restore(&store, 42, Settings::load(&store));
    for def in &CONCEPTS {
        answer_correctly(&mut session, def.key);
    }
    let wrong = session.new_problem(ConceptKey::Dot);
    assert!(!session.submit(&wrong, "dot product").check.correct);

    let status = session.status();
    assert_eq!(status.level, 2);
    assert_eq!(status.total, 7);
    assert_eq!(status.correct, 6);
    assert_eq!(status.streak, 0);

    // Six correct answers plus one level-up bonus always cover the first boost
    let outcome = session.purchase(&Purchase::Boost { kind: BoostKind::Xp });
    assert_eq!(outcome, PurchaseOutcome::Purchased { price: 150 });
    session.persist(&mut store).unwrap();

    let mut resumed = Session::restore(&store, 7, Settings::load(&store));
    assert_eq!(resumed.snapshot(), session.snapshot());
    assert_eq!(resumed.status().xp_boost_percent, 5);

    let reward = {
        let problem = resumed.new_problem(ConceptKey::Magnitude);
        resumed.submit(&problem, &problem.canonical_answer()).reward
    };
    assert_eq!(reward.map(|r| r.xp_gained), Some(25.0 * 1.05));
}

#[test]
fn owned_item_cannot_be_bought_twice() {
    let mut session = Session::new(3, Settings::default());
    session.economy.coins = 1000;
    let themes = session
        .store_items()
        .into_iter()
        .find(|item| item.name == "Custom Themes")
        .unwrap();

    assert_eq!(session.purchase(&themes.purchase), PurchaseOutcome::Purchased { price: 200 });
    assert_eq!(session.purchase(&themes.purchase), PurchaseOutcome::AlreadyOwned);
    assert_eq!(session.economy.coins, 800);
    assert!(session
        .store_items()
        .iter()
        .any(|item| item.name == "Custom Themes" && item.owned));
}

#[test]
fn reset_wipes_persisted_progress() {
    let mut store = MemoryStore::new();
    let mut session = Session::new(9, Settings::default());
    for _ in 0..5 {
        answer_correctly(&mut session, ConceptKey::Unit);
    }
    session.persist(&mut store).unwrap();
    assert_eq!(store.get("vt2d_level").as_deref(), Some("2"));

    session.reset_all();
    session.persist(&mut store).unwrap();
    let resumed = Session::restore(&store, 1, Settings::default());
    assert_eq!(resumed.status().level, 1);
    assert_eq!(resumed.status().coins, 0);
    assert_eq!(resumed.status().total, 0);
}
