//! Vector math over 2D operands
//!
//! Pure functions only. Degenerate inputs never panic: the angle against a
//! zero vector is NaN, and projecting onto / normalizing a zero vector yields
//! the zero vector.

use glam::DVec2;
use std::f64::consts::PI;

/// A 2D operand vector
pub type Vector2 = DVec2;

/// Length of `v`
#[inline]
pub fn magnitude(v: Vector2) -> f64 {
    v.length()
}

/// Component-wise `a - b`
#[inline]
pub fn subtract(a: Vector2, b: Vector2) -> Vector2 {
    a - b
}

#[inline]
pub fn dot(a: Vector2, b: Vector2) -> f64 {
    a.dot(b)
}

/// Distance from `a` to `b`, i.e. `|b - a|`
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    magnitude(subtract(b, a))
}

/// Angle between `a` and `b` in degrees, in `[0, 180]`.
///
/// Returns NaN when either vector has zero length.
pub fn angle_degrees(a: Vector2, b: Vector2) -> f64 {
    let m = magnitude(a) * magnitude(b);
    if m == 0.0 {
        return f64::NAN;
    }
    let theta = (dot(a, b) / m).clamp(-1.0, 1.0).acos();
    theta * 180.0 / PI
}

/// Projection of `a` onto `b`: `(a·b / |b|²) b`
pub fn projection(a: Vector2, b: Vector2) -> Vector2 {
    let denom = dot(b, b);
    if denom == 0.0 {
        return Vector2::ZERO;
    }
    b * (dot(a, b) / denom)
}

/// Unit vector in the direction of `v` (zero for the zero vector)
pub fn unit(v: Vector2) -> Vector2 {
    let m = magnitude(v);
    if m == 0.0 {
        return Vector2::ZERO;
    }
    v / m
}

/// Render integer-valued operands the way prompts show them: `(3, -4)`
pub fn format_operand(v: Vector2) -> String {
    format!("({}, {})", v.x, v.y)
}
