//! Coercions for loosely typed host values.
//!
//! Host documents store numbers as JSON numbers, numeric strings, blank
//! strings or `null` interchangeably. These helpers collapse all of that into
//! `Option`s; callers decide the default.

use serde_json::Value;

/// Walks `path` through nested objects.
pub(crate) fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// A finite number, from a JSON number or a numeric string.
///
/// Strings may carry a leading `+` (`"+2"`), as host bonus fields do.
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// A whole number, truncating any fraction.
pub(crate) fn int(value: Option<&Value>) -> Option<i32> {
    number(value).map(|n| n.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

/// A non-negative whole number.
pub(crate) fn uint(value: Option<&Value>) -> Option<u32> {
    number(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.trunc().min(f64::from(u32::MAX)) as u32)
}

/// An optional non-negative override. Present but non-numeric values are
/// logged and dropped.
pub(crate) fn override_value(value: Option<&Value>, field: &str) -> Option<u32> {
    let raw = value?;
    if raw.is_null() || raw.as_str().is_some_and(|s| s.trim().is_empty()) {
        return None;
    }
    let parsed = uint(Some(raw));
    if parsed.is_none() {
        tracing::debug!(field, value = %raw, "ignoring non-numeric override");
    }
    parsed
}

/// Host truthiness: `true`, non-zero numbers and `"true"`/`"1"` strings.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
        _ => false,
    }
}

pub(crate) fn string(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}
