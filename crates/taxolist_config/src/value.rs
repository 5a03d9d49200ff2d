//! Loose coercion of raw setting values.
//!
//! Settings arrive from forms and storage with no type guarantees, so every
//! coercion here is total: anything that cannot be read as the wanted type
//! becomes its zero value.

use std::collections::BTreeSet;

use serde_json::Value;

/// Reads a value as a signed integer.
///
/// Strings contribute their leading integer (`"12px"` is 12, `"abc"` is 0),
/// floats truncate toward zero and booleans are 0 or 1.
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                n.as_f64().map_or(0, |f| f.trunc() as i64)
            }
        }
        Value::String(s) => leading_int(s),
        Value::Bool(b) => i64::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Reads a value as a non-negative integer; negatives clamp to zero.
pub fn to_uint(value: &Value) -> u32 {
    u32::try_from(to_int(value).max(0)).unwrap_or(u32::MAX)
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut n: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative { -n } else { n }
}

/// Reads a value as a flag using loose truthiness.
///
/// Empty strings, `"0"`, zero, `null`, `false` and empty collections are
/// false; everything else is true.
pub fn to_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Reads a scalar value as text; collections become empty.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Reads a set of term identifiers.
///
/// Accepts an array, a comma separated string, a single number, or an object
/// whose values are any of those (keyed by taxonomy). Zero never identifies
/// a term and is dropped.
pub fn to_term_ids(value: &Value) -> BTreeSet<u64> {
    let mut ids = BTreeSet::new();
    collect_term_ids(value, &mut ids);
    ids.remove(&0);
    ids
}

fn collect_term_ids(value: &Value, ids: &mut BTreeSet<u64>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_term_ids(item, ids);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_term_ids(item, ids);
            }
        }
        Value::String(s) if s.contains(',') => {
            for part in s.split(',') {
                ids.insert(u64::from(to_uint(&Value::String(part.to_string()))));
            }
        }
        Value::Null | Value::Bool(_) => {}
        scalar => {
            ids.insert(u64::from(to_uint(scalar)));
        }
    }
}
