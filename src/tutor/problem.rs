//! Procedural problem generation
//!
//! Operands are uniform integer draws from the injected RNG. Draws are not
//! filtered: a zero operand can appear, and its answer follows the degenerate
//! fallbacks in [`super::vector`].

use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

use super::concept::ConceptKey;
use super::verify::Answer;
use super::vector::{self, Vector2, format_operand};

/// Decimal places for rounded scalar and vector answers
pub const ANSWER_DECIMALS: usize = 3;
/// Decimal places for angle answers (degrees)
pub const ANGLE_DECIMALS: usize = 1;

/// Name of an operand in a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandRole {
    V,
    A,
    B,
}

impl OperandRole {
    pub fn label(&self) -> &'static str {
        match self {
            OperandRole::V => "v",
            OperandRole::A => "a",
            OperandRole::B => "b",
        }
    }
}

impl ConceptKey {
    /// Half-width of the integer range each operand component is drawn from
    pub fn operand_range(&self) -> i32 {
        match self {
            ConceptKey::Magnitude => 7,
            ConceptKey::Distance | ConceptKey::Projection | ConceptKey::Unit => 6,
            ConceptKey::Dot | ConceptKey::Angle => 5,
        }
    }
}

/// One generated problem instance. Never mutated; ask for a new one instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    pub concept: ConceptKey,
    pub prompt: String,
    pub operands: BTreeMap<OperandRole, Vector2>,
    pub answer: Answer,
}

impl Problem {
    pub fn canonical_answer(&self) -> String {
        self.answer.canonical()
    }

    /// Check raw user text against this problem's own answer
    pub fn verify(&self, input: &str) -> bool {
        self.answer.verify(input)
    }

    pub fn operand(&self, role: OperandRole) -> Option<Vector2> {
        self.operands.get(&role).copied()
    }
}

fn draw_vector<R: Rng>(rng: &mut R, range: i32) -> Vector2 {
    let x = rng.random_range(-range..=range);
    let y = rng.random_range(-range..=range);
    Vector2::new(x as f64, y as f64)
}

/// Generate a problem for `key`
pub fn generate<R: Rng>(key: ConceptKey, rng: &mut R) -> Problem {
    let range = key.operand_range();
    let operands = match key {
        ConceptKey::Magnitude | ConceptKey::Unit => {
            BTreeMap::from([(OperandRole::V, draw_vector(rng, range))])
        }
        _ => {
            let a = draw_vector(rng, range);
            let b = draw_vector(rng, range);
            BTreeMap::from([(OperandRole::A, a), (OperandRole::B, b)])
        }
    };
    Problem::from_operands(key, operands)
}

impl Problem {
    /// Build the prompt and answer for already chosen operands. A role the
    /// concept needs but `operands` lacks is taken as the zero vector.
    pub(crate) fn from_operands(key: ConceptKey, operands: BTreeMap<OperandRole, Vector2>) -> Self {
        let get = |role: OperandRole| operands.get(&role).copied().unwrap_or(Vector2::ZERO);

        let (prompt, answer) = match key {
            ConceptKey::Magnitude => {
                let v = get(OperandRole::V);
                (
                    format!("Find the length of v = {}. Round to 3 decimals.", format_operand(v)),
                    Answer::Scalar {
                        value: vector::magnitude(v),
                        decimals: ANSWER_DECIMALS,
                    },
                )
            }
            ConceptKey::Unit => {
                let v = get(OperandRole::V);
                (
                    format!(
                        "Find the unit vector in the direction of v = {}. 3 dp.",
                        format_operand(v)
                    ),
                    Answer::Vector {
                        value: vector::unit(v),
                        decimals: ANSWER_DECIMALS,
                    },
                )
            }
            ConceptKey::Distance | ConceptKey::Dot | ConceptKey::Angle | ConceptKey::Projection => {
                let (a, b) = (get(OperandRole::A), get(OperandRole::B));
                let (a_text, b_text) = (format_operand(a), format_operand(b));
                match key {
                    ConceptKey::Distance => (
                        format!("Find the distance from A = {a_text} to B = {b_text}, 3 dp."),
                        Answer::Scalar {
                            value: vector::distance(a, b),
                            decimals: ANSWER_DECIMALS,
                        },
                    ),
                    ConceptKey::Dot => (
                        format!("Compute a · b for a = {a_text}, b = {b_text}."),
                        // Integer operands keep the dot product exact
                        Answer::Integer {
                            value: vector::dot(a, b) as i64,
                        },
                    ),
                    ConceptKey::Angle => (
                        format!(
                            "Find the angle between a = {a_text} and b = {b_text} in degrees, 1 dp."
                        ),
                        Answer::Scalar {
                            value: vector::angle_degrees(a, b),
                            decimals: ANGLE_DECIMALS,
                        },
                    ),
                    _ => (
                        format!(
                            "Find proj_b(a) for a = {a_text}, b = {b_text}. Round components to 3 dp."
                        ),
                        Answer::Vector {
                            value: vector::projection(a, b),
                            decimals: ANSWER_DECIMALS,
                        },
                    ),
                }
            }
        };

        Self {
            concept: key,
            prompt,
            operands,
            answer,
        }
    }
}
