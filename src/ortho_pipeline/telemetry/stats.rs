//! Column reductions used by the telemetry aggregator.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};

use crate::ortho_pipeline::telemetry::types::Timestamp;

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Median of the values, averaging the two middle ones on an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value. Ties go to the lexicographically smallest value.
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// Earliest timestamp by UTC instant.
pub fn earliest(values: &[Timestamp]) -> Option<Timestamp> {
    values.iter().copied().min_by_key(|t| t.instant())
}

/// Parses a numeric telemetry cell; `strip_sign` drops one leading `+`.
///
/// Print-converted cells such as `120.5 m Above Sea Level` keep their
/// leading number.
pub fn parse_number(cell: &str, strip_sign: bool) -> Option<f64> {
    let cell = cell.trim();
    let cell = if strip_sign {
        cell.strip_prefix('+').unwrap_or(cell)
    } else {
        cell
    };
    leading_number(cell)
}

/// Parses the first whitespace separated token of `text` as a number.
pub fn leading_number(text: &str) -> Option<f64> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Rewrites `YYYY:MM:DD hh:mm:ss,fff` style stamps to `YYYY-MM-DD hh:mm:ss.fff`.
pub fn normalize_timestamp(raw: &str) -> String {
    let mut text: String = raw.trim().to_string();

    let bytes = text.as_bytes();
    let colon_date = bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b':'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b':'
        && bytes[8..10].iter().all(u8::is_ascii_digit);
    if colon_date {
        text.replace_range(4..5, "-");
        text.replace_range(7..8, "-");
    }

    let mut text = text.replace(',', ".");
    if text.ends_with('Z') {
        text.pop();
        text.push_str("+00:00");
    }
    text
}

/// Parses a telemetry timestamp cell, or `None` if it matches no known layout.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let text = normalize_timestamp(raw);
    if text.is_empty() {
        return None;
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&text, format) {
            return Some(Timestamp::Zoned(dt));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, format) {
            return Some(Timestamp::Naive(dt));
        }
    }
    None
}
