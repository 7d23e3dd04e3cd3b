use serde_json::Value;
use crate::errors::TalentError;

/// Parse a provider's text answer as a JSON object.
///
/// Handles the usual wrapping: Markdown code fences and prose around the
/// object. Anything that does not yield a JSON object is malformed output.
pub fn parse_provider_json(text: &str) -> Result<Value, TalentError> {
    let stripped = strip_code_fences(text);

    if let Ok(v) = serde_json::from_str::<Value>(stripped) {
        return require_object(v);
    }

    let start = stripped.find('{');
    let end = stripped.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<Value>(&stripped[start..=end])
                .map_err(|e| TalentError::MalformedOutput(format!("JSON parse error: {}", e)))
                .and_then(require_object)
        }
        _ => Err(TalentError::MalformedOutput("No JSON object in provider response".into())),
    }
}

/// Remove a surrounding ```json ... ``` (or bare ```) fence.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag on the opening fence line.
    let body = match rest.find('\n') {
        Some(nl) if rest[..nl].chars().all(|c| c.is_ascii_alphanumeric()) => &rest[nl + 1..],
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn require_object(value: Value) -> Result<Value, TalentError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(TalentError::MalformedOutput("Provider response is not a JSON object".into()))
    }
}
