//! Record normalization.
//!
//! The cleaned CSV still carries values exactly as the state publishes
//! them: `"91.3%"`, `"$54,321.00"`, `" 502 "`, or nothing at all. Every
//! consumer goes through [`normalize_value`] so that the map, scatterplot,
//! and trend views agree on what a cell means.

use school_map_district_models::RawRecord;

/// Parses a raw cell into a finite number.
///
/// Strips every `$`, `,`, and `%`, trims whitespace, and parses what is
/// left. Returns `None` for empty input, unparseable text (`"N/A"`,
/// `"—"`), and non-finite results; never `Some(0.0)` for a missing value.
#[must_use]
pub fn normalize_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalizes `record`'s value for `column`. A missing column is absent.
#[must_use]
pub fn normalize_field(record: &RawRecord, column: &str) -> Option<f64> {
    record.value(column).and_then(normalize_value)
}

/// Parses a year cell, accepting integral floats such as `"2021.0"`.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.fract() != 0.0 || float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(float as i32)
}
