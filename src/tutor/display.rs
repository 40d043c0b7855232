//! Arrow geometry for plotting a problem
//!
//! Produces the arrows a renderer draws for a problem, in vector units. Tips
//! are clamped so the arrowhead stays inside the visible plot.

use serde::Serialize;

use super::concept::ConceptKey;
use super::problem::{OperandRole, Problem};
use super::vector::{self, Vector2};
use crate::consts::{ARROW_MARGIN, ARROWHEAD_SIZE, VIEWPORT_WIDTH, WORLD_HALF_EXTENT};

/// One arrow from the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub key: &'static str,
    pub label: &'static str,
    /// Tip position after clamping
    pub tip: Vector2,
    /// Unclamped tip
    pub original: Vector2,
    /// Derived arrows (difference, projection) are drawn dashed
    pub dashed: bool,
    pub clamped: bool,
}

/// Largest coordinate a tip may have and still show its arrowhead
pub fn max_visible_coord() -> f64 {
    let pixels_per_unit = VIEWPORT_WIDTH / (WORLD_HALF_EXTENT * 2.0);
    WORLD_HALF_EXTENT - ARROWHEAD_SIZE / pixels_per_unit - ARROW_MARGIN / pixels_per_unit
}

fn arrow(key: &'static str, label: &'static str, original: Vector2, dashed: bool) -> Arrow {
    let limit = max_visible_coord();
    let tip = original.clamp(Vector2::splat(-limit), Vector2::splat(limit));
    Arrow {
        key,
        label,
        tip,
        original,
        dashed,
        clamped: tip != original,
    }
}

impl Problem {
    /// Operand arrows followed by any derived arrows for the concept
    pub fn arrows(&self) -> Vec<Arrow> {
        let mut arrows: Vec<Arrow> = self
            .operands
            .iter()
            .map(|(role, &v)| arrow(role.label(), role.label(), v, false))
            .collect();

        if let (Some(a), Some(b)) = (self.operand(OperandRole::A), self.operand(OperandRole::B)) {
            match self.concept {
                ConceptKey::Distance => arrows.push(arrow("b-a", "B−A", vector::subtract(b, a), true)),
                ConceptKey::Projection => {
                    arrows.push(arrow("proj", "proj", vector::projection(a, b), true))
                }
                _ => {}
            }
        }
        arrows
    }
}
