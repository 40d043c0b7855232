//! Tutoring core
//!
//! Everything here is pure or driven through an explicit [`Session`]:
//! - Seeded RNG only (injected, never ambient)
//! - No rendering, audio or storage dependencies
//! - Malformed input resolves to "incorrect" or "denied", never an error

pub mod concept;
pub mod display;
pub mod economy;
pub mod problem;
pub mod progression;
pub mod session;
pub mod vector;
pub mod verify;

pub use concept::{CONCEPTS, ConceptDefinition, ConceptKey, ConceptSummary, Explainer, list_concepts};
pub use display::Arrow;
pub use economy::{
    ActiveBoosts, Boost, BoostKind, Economy, ITEM_CATALOG, Purchase, PurchaseOutcome, StoreItem,
};
pub use problem::{OperandRole, Problem, generate};
pub use progression::{LevelUp, Progression};
pub use session::{AnswerCheck, Reward, Session, SessionStatus, Submission};
pub use vector::Vector2;
pub use verify::{Answer, to_fixed};
