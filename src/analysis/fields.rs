//! Lenient accessors over provider JSON, which is never schema-guaranteed.

use serde_json::Value;

/// First non-blank string among `keys`.
pub fn first_str<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// First value among `keys` that reads as a finite number.
pub fn first_number(obj: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(as_number)
}

/// Numbers, and strings such as "85", "4.2/5" or "72%".
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let head = s.trim().split(['/', '%', ' ']).next().unwrap_or("");
            head.replace(',', "").parse::<f64>().ok()
        }
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Non-negative integer count; "1,234 reviews" reads as 1234.
pub fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => {
            let digits: String = s.trim()
                .split_whitespace()
                .next()
                .unwrap_or("")
                .chars()
                .filter(|c| *c != ',')
                .collect();
            digits.parse::<u64>().ok()
        }
        _ => None,
    }
}

pub fn first_count(obj: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(as_count)
}

/// Non-blank strings from an array, or from a single comma-separated string.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                other => first_str(other, &["name", "theme", "title"]).map(str::to_string),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
