//! Answer checking
//!
//! Answers are compared as fixed-point strings, not by numeric tolerance:
//! both the user's number and the canonical value are rendered at the
//! concept's precision and must match exactly.

use serde::Serialize;

use super::vector::Vector2;

/// Render `value` with exactly `decimals` fractional digits.
///
/// Exact half-way values round away from zero (`45.25` -> `45.3`), as a
/// browser's `toFixed` does. A result that rounds to zero never carries a
/// sign, so a component that is `-0.0` after projection compares equal to a
/// typed `0`. NaN renders as `NaN`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let value = if is_half_way(value, decimals) {
        // The next float out from a tie rounds away from zero
        f64::from_bits(value.abs().to_bits() + 1).copysign(value)
    } else {
        value
    };
    let rendered = format!("{value:.decimals$}");
    match rendered.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => rendered,
    }
}

/// Whether `value` sits exactly between two `decimals`-place neighbours
fn is_half_way(value: f64, decimals: usize) -> bool {
    if !value.is_finite() {
        return false;
    }
    // A tie shows as a 5 followed only by zeros
    let wide = format!("{:.*}", decimals + 30, value.abs());
    let Some((_, fraction)) = wide.split_once('.') else {
        return false;
    };
    let rest = &fraction[decimals..];
    rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0')
}

/// Parse one finite number from user text (surrounding whitespace ignored)
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a vector answer such as `(0.6, 0.8)`, `[0.6,0.8]` or `0.6, 0.8`.
///
/// Brackets, parentheses and whitespace are stripped and empty tokens are
/// dropped. Any token that is not a number fails the whole parse.
pub fn parse_components(input: &str) -> Option<Vec<f64>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']') && !c.is_whitespace())
        .collect();
    cleaned
        .split(',')
        .filter(|token| !token.is_empty())
        .map(parse_number)
        .collect()
}

/// The canonical answer of a problem together with its checking rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Scalar compared after rounding to `decimals` places. NaN marks an
    /// undefined result (angle against a zero vector).
    Scalar { value: f64, decimals: usize },
    /// Integer compared by exact numeric value
    Integer { value: i64 },
    /// Vector compared component-wise after rounding
    Vector { value: Vector2, decimals: usize },
}

/// Text accepted for an undefined scalar answer
const UNDEFINED_ANSWER: &str = "undefined";

impl Answer {
    /// Canonical answer text shown to the user
    pub fn canonical(&self) -> String {
        match *self {
            Answer::Scalar { value, .. } if value.is_nan() => UNDEFINED_ANSWER.to_string(),
            Answer::Scalar { value, decimals } => to_fixed(value, decimals),
            Answer::Integer { value } => value.to_string(),
            Answer::Vector { value, decimals } => format!(
                "({}, {})",
                to_fixed(value.x, decimals),
                to_fixed(value.y, decimals)
            ),
        }
    }

    /// Check raw user text against this answer. Malformed text is incorrect.
    pub fn verify(&self, input: &str) -> bool {
        match *self {
            Answer::Scalar { value, .. } if value.is_nan() => {
                let trimmed = input.trim();
                trimmed.eq_ignore_ascii_case(UNDEFINED_ANSWER) || trimmed.eq_ignore_ascii_case("nan")
            }
            Answer::Scalar { value, decimals } => parse_number(input)
                .is_some_and(|n| to_fixed(n, decimals) == to_fixed(value, decimals)),
            Answer::Integer { value } => parse_number(input).is_some_and(|n| n == value as f64),
            Answer::Vector { value, decimals } => {
                let Some(parts) = parse_components(input) else {
                    return false;
                };
                let typed: Vec<String> = parts.iter().map(|&n| to_fixed(n, decimals)).collect();
                let expected = [to_fixed(value.x, decimals), to_fixed(value.y, decimals)];
                typed.join(",") == expected.join(",")
            }
        }
    }
}
