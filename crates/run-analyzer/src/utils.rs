//! Shared parsing and formatting helpers.

use crate::error::{AnalysisError, Result};

// =============================================================================
// Numeric Cell Parsing
// =============================================================================

/// Characters used as thousands separators or padding in exported numbers.
pub const NUMERIC_FORMAT_CHARS: [char; 3] = [',', ' ', '\u{a0}'];

/// Missing-value markers seen in activity exports (Garmin writes `--`).
pub const MISSING_MARKERS: [&str; 10] = [
    "--", "n/a", "na", "null", "none", "nan", "unknown", "missing", "error", "#n/a",
];

/// Strip thousands separators and padding from a numeric cell.
///
/// ```rust,ignore
/// assert_eq!(clean_numeric_string(" 1,234 "), "1234");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Check if a cell holds a missing-value marker.
pub fn is_missing_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.is_empty() || MISSING_MARKERS.iter().any(|&marker| lower == marker)
}

/// Parse a numeric cell, returning `None` for markers and unparseable text.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    if is_missing_marker(s) {
        return None;
    }
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Durations
// =============================================================================

/// Convert `M:S` or `H:M:S` text (optionally with a fractional `.ss` suffix) to
/// whole seconds.
///
/// The fractional part is discarded before splitting. Any component count other
/// than 2 or 3, a non-integer component, or a total that overflows yields `None`.
pub fn parse_duration(text: &str) -> Option<f64> {
    let whole = text.trim().split('.').next()?;
    let parts = whole
        .split(':')
        .map(|p| p.trim().parse::<i64>().ok())
        .collect::<Option<Vec<i64>>>()?;

    let secs = match parts.as_slice() {
        [m, s] => m.checked_mul(60)?.checked_add(*s)?,
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s)?,
        _ => return None,
    };
    Some(secs as f64)
}

/// Render seconds as `HH:MM:SS.ss` (one hour or more) or `MM:SS.ss`.
///
/// # Errors
///
/// `InvalidValue` for negative or non-finite input.
pub fn format_duration(seconds: f64) -> Result<String> {
    if !seconds.is_finite() {
        return Err(AnalysisError::InvalidValue(format!(
            "Duration must be finite, got {seconds}"
        )));
    }
    if seconds < 0.0 {
        return Err(AnalysisError::InvalidValue(format!(
            "Seconds cannot be negative, got {seconds}"
        )));
    }

    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let remaining = seconds % 60.0;

    if hours > 0 {
        Ok(format!("{hours:02}:{minutes:02}:{remaining:05.2}"))
    } else {
        Ok(format!("{minutes:02}:{remaining:05.2}"))
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Render a float key the shortest way that reads back to the same value
/// (`5.0` -> `"5"`, `3.22` -> `"3.22"`).
pub fn float_key(value: f64) -> String {
    format!("{value}")
}

// =============================================================================
// Tests
// =============================================================================
