//! Cell value normalization.
//!
//! Every component that compares, groups, or filters cell values goes
//! through [`NormalizedValue`] so that `"7"`, `"007"`, and `"7.0"` share one
//! identity, and empty/blank cells collapse to the [`MISSING`] marker.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Marker for missing or blank cells.
pub const MISSING: &str = "NaN";

/// The canonical identity of a cell, used for equality and grouping.
///
/// A distinct type rather than a bare `String` so raw and normalized keys
/// cannot be mixed at interface boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedValue(String);

// Deserialization goes back through `from_raw` so values arriving from a
// command script are canonical no matter how they were spelled.
impl<'de> Deserialize<'de> for NormalizedValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(NormalizedValue::from_raw(&raw))
    }
}

impl NormalizedValue {
    /// Canonicalize a raw cell string.
    ///
    /// - Empty or all-whitespace input becomes the `"NaN"` marker.
    /// - Input that parses as a finite number becomes that number's
    ///   shortest round-trip decimal form (`"007"` → `"7"`, `"1e2"` → `"100"`).
    /// - Anything else is kept as the trimmed original string.
    pub fn from_raw(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self(MISSING.to_string());
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self(n.to_string()),
            _ => Self(trimmed.to_string()),
        }
    }

    /// The marker for a missing cell.
    pub fn missing() -> Self {
        Self(MISSING.to_string())
    }

    /// Whether this is the missing-value marker.
    pub fn is_missing(&self) -> bool {
        self.0 == MISSING
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the leading numeric prefix of a string, `parseFloat`-style.
///
/// Returns NaN when no numeric prefix exists. Trailing garbage is ignored
/// (`"12px"` → `12.0`), which is what the arithmetic and binning commands
/// rely on for partially numeric cells.
pub fn parse_float_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    let b = t.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let mut digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Optional exponent; only consumed when it has at least one digit.
    let mantissa_end = i;
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let mut exp_digits = 0;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
            exp_digits += 1;
        }
        if exp_digits > 0 {
            i = j;
        } else {
            i = mantissa_end;
        }
    }

    t[..i].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_blank_is_missing() {
        assert_eq!(NormalizedValue::from_raw("").as_str(), "NaN");
        assert_eq!(NormalizedValue::from_raw("   ").as_str(), "NaN");
        assert_eq!(NormalizedValue::from_raw("\t \n").as_str(), "NaN");
        assert!(NormalizedValue::from_raw("").is_missing());
    }

    #[test]
    fn test_normalize_numeric_canonical_form() {
        assert_eq!(NormalizedValue::from_raw("007").as_str(), "7");
        assert_eq!(NormalizedValue::from_raw("7.0").as_str(), "7");
        assert_eq!(NormalizedValue::from_raw("1e2").as_str(), "100");
        assert_eq!(NormalizedValue::from_raw(" 3.50 ").as_str(), "3.5");
        assert_eq!(NormalizedValue::from_raw("-0.25").as_str(), "-0.25");
    }

    #[test]
    fn test_normalize_equal_numbers_share_identity() {
        for (a, b) in [("7", "7.0"), ("7", "007"), ("100", "1e2")] {
            assert_eq!(NormalizedValue::from_raw(a), NormalizedValue::from_raw(b));
        }
    }

    #[test]
    fn test_normalize_string_trimmed_case_preserved() {
        assert_eq!(NormalizedValue::from_raw("  Alice ").as_str(), "Alice");
        assert_eq!(NormalizedValue::from_raw("N/A").as_str(), "N/A");
    }

    #[test]
    fn test_normalize_non_finite_stays_string() {
        // "inf" parses as f64 infinity but is not a finite number, so it is
        // treated as a plain string.
        assert_eq!(NormalizedValue::from_raw("inf").as_str(), "inf");
        assert_eq!(NormalizedValue::from_raw("NaN").as_str(), "NaN");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["", "  ", "007", "x  ", "1e3", "abc", "3.50"] {
            let once = NormalizedValue::from_raw(raw);
            let twice = NormalizedValue::from_raw(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("12"), 12.0);
        assert_eq!(parse_float_prefix("12px"), 12.0);
        assert_eq!(parse_float_prefix("-3.5 kg"), -3.5);
        assert_eq!(parse_float_prefix("  2.5e2x"), 250.0);
        assert_eq!(parse_float_prefix("3."), 3.0);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        // An exponent marker without digits is not part of the number.
        assert_eq!(parse_float_prefix("1e"), 1.0);
        assert_eq!(parse_float_prefix("1e+"), 1.0);
        assert!(parse_float_prefix("abc").is_nan());
        assert!(parse_float_prefix("").is_nan());
        assert!(parse_float_prefix("+").is_nan());
    }
}
