//! The fixed catalog of practice concepts
//!
//! Order matters: it is the order concepts are listed to the user, and the
//! first entry is the default selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::problem::{Problem, generate};

/// Identifier of a practice concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptKey {
    Magnitude,
    Distance,
    Dot,
    Angle,
    Projection,
    Unit,
}

impl ConceptKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptKey::Magnitude => "magnitude",
            ConceptKey::Distance => "distance",
            ConceptKey::Dot => "dot",
            ConceptKey::Angle => "angle",
            ConceptKey::Projection => "projection",
            ConceptKey::Unit => "unit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "magnitude" | "length" => Some(ConceptKey::Magnitude),
            "distance" => Some(ConceptKey::Distance),
            "dot" => Some(ConceptKey::Dot),
            "angle" => Some(ConceptKey::Angle),
            "projection" | "proj" => Some(ConceptKey::Projection),
            "unit" => Some(ConceptKey::Unit),
            _ => None,
        }
    }
}

/// Teaching content shown next to the practice card
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Explainer {
    pub idea: &'static str,
    pub steps: &'static [&'static str],
    pub formula: &'static str,
    pub example: &'static str,
    pub pro_tips: &'static [&'static str],
}

impl Explainer {
    /// Text handed to a speech synthesizer when the card is read aloud
    pub fn narration_text(&self, title: &str) -> String {
        let mut parts = vec![title.to_string(), self.idea.to_string()];
        parts.push(format!("Steps: {}", self.steps.join(". ")));
        if !self.example.is_empty() {
            parts.push(format!("Example: {}", self.example));
        }
        if !self.pro_tips.is_empty() {
            parts.push(format!("Pro Tips: {}", self.pro_tips.join(". ")));
        }
        parts.push(format!("Formula: {}", self.formula));
        parts.join(". ")
    }
}

/// One entry of the catalog
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConceptDefinition {
    pub key: ConceptKey,
    pub title: &'static str,
    pub explainer: Explainer,
}

impl ConceptDefinition {
    /// Draw a fresh problem for this concept
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Problem {
        generate(self.key, rng)
    }
}

/// Key and title pair for concept pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptSummary {
    pub key: ConceptKey,
    pub title: &'static str,
}

pub const CONCEPTS: [ConceptDefinition; 6] = [
    ConceptDefinition {
        key: ConceptKey::Magnitude,
        title: "Length / Magnitude",
        explainer: Explainer {
            idea: "For v = (x, y), the length is |v| = sqrt(x^2 + y^2).",
            steps: &["Square each component.", "Add the squares.", "Take the square root."],
            formula: "|v| = sqrt(x^2 + y^2)",
            example: "v = (3, 4) → |v| = √(3² + 4²) = √(9 + 16) = √25 = 5",
            pro_tips: &[
                "The magnitude is always positive (or zero)",
                "Think of it as the distance from origin to the point",
                "Useful for normalizing vectors to unit length",
            ],
        },
    },
    ConceptDefinition {
        key: ConceptKey::Distance,
        title: "Distance (A to B)",
        explainer: Explainer {
            idea: "Distance from A to B is the length of B − A in 2D.",
            steps: &["Compute B − A.", "Find the magnitude of B − A."],
            formula: "d(A,B) = |B - A|",
            example: "A = (1, 2), B = (4, 6) → B−A = (3, 4) → d = √(3² + 4²) = 5",
            pro_tips: &[
                "Distance is commutative: d(A,B) = d(B,A)",
                "The vector B−A points from A to B",
                "Useful in physics for displacement calculations",
            ],
        },
    },
    ConceptDefinition {
        key: ConceptKey::Dot,
        title: "Dot Product",
        explainer: Explainer {
            idea: "For a = (x1, y1), b = (x2, y2): a · b = x1x2 + y1y2.",
            steps: &["Multiply component-wise.", "Add the results."],
            formula: "a · b = x1x2 + y1y2",
            example: "a = (2, 3), b = (4, 1) → a·b = 2×4 + 3×1 = 8 + 3 = 11",
            pro_tips: &[
                "Dot product is commutative: a·b = b·a",
                "a·b = |a||b|cos(θ) where θ is the angle between vectors",
                "Zero dot product means vectors are perpendicular",
            ],
        },
    },
    ConceptDefinition {
        key: ConceptKey::Angle,
        title: "Angle Between",
        explainer: Explainer {
            idea: "Use cos θ = (a · b)/(|a||b|).",
            steps: &["Compute a · b.", "Compute |a| and |b|.", "Divide and take arccos."],
            formula: "θ = arccos((a · b)/(|a||b|))",
            example: "a = (1, 0), b = (0, 1) → a·b = 0, |a| = 1, |b| = 1 → θ = arccos(0) = 90°",
            pro_tips: &[
                "Result is always between 0° and 180°",
                "Parallel vectors: θ = 0° (cos θ = 1)",
                "Perpendicular vectors: θ = 90° (cos θ = 0)",
            ],
        },
    },
    ConceptDefinition {
        key: ConceptKey::Projection,
        title: "Projection",
        explainer: Explainer {
            idea: "Projection of a onto b is (a·b/|b|^2) b.",
            steps: &["Compute a·b.", "Divide by |b|^2.", "Scale vector b."],
            formula: "proj_b(a) = (a·b/|b|^2)b",
            example: "a = (3, 4), b = (1, 0) → a·b = 3, |b|² = 1 → proj = (3/1)(1, 0) = (3, 0)",
            pro_tips: &[
                "Projection gives the component of a in the direction of b",
                "Result is always parallel to vector b",
                "Useful for decomposing vectors into components",
            ],
        },
    },
    ConceptDefinition {
        key: ConceptKey::Unit,
        title: "Unit Vector",
        explainer: Explainer {
            idea: "A unit vector has length 1. For v = (x, y), make v/|v|.",
            steps: &["Compute |v|.", "Divide each component by |v|."],
            formula: "v̂ = v/|v|",
            example: "v = (6, 8) → |v| = √(6² + 8²) = 10 → v̂ = (6/10, 8/10) = (0.6, 0.8)",
            pro_tips: &[
                "Unit vectors preserve direction but have length 1",
                "Useful for representing directions without magnitude",
                "Any vector can be written as |v| × v̂",
            ],
        },
    },
];

/// Look up a concept definition by key
pub fn concept(key: ConceptKey) -> &'static ConceptDefinition {
    // Every key has exactly one entry, in declaration order
    &CONCEPTS[key as usize]
}

/// Ordered key/title list
pub fn list_concepts() -> Vec<ConceptSummary> {
    CONCEPTS
        .iter()
        .map(|c| ConceptSummary {
            key: c.key,
            title: c.title,
        })
        .collect()
}
