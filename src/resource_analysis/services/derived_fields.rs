//! Numeric conversions shared by the kind profiles.
//!
//! Everything here is pure: given the same inputs and `now`, the same
//! derived values come out.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Rounds to 2 decimal places (half away from zero)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bytes to GiB, rounded to 2 decimals
pub fn bytes_to_gb(bytes: f64) -> f64 {
    round2(bytes / BYTES_PER_GB)
}

/// Bytes to MiB, rounded to 2 decimals
pub fn bytes_to_mb(bytes: f64) -> f64 {
    round2(bytes / BYTES_PER_MB)
}

/// Whole days elapsed since `since`, floored.
///
/// `now` is moved into the timestamp's own offset before subtracting.
pub fn age_days(since: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    let local_now = now.with_timezone(since.offset());
    (local_now - since).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Aggregated counters (ops, requests, objects) are reported as integers
pub fn to_count(value: f64) -> i64 {
    value.trunc() as i64
}

/// JSON number for a 2-decimal quantity
pub fn decimal_value(value: f64) -> Value {
    Value::from(round2(value))
}

/// Renders a percentage with one decimal, e.g. `12.3%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Renders an integer with `,` thousands separators, e.g. `1,234,567`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
