use reqwest::{Response, StatusCode};
use serde_json::Value;
use crate::errors::{parse_retry_after, TalentError};
use crate::utils::truncation::truncate_error;

/// Turn a non-2xx provider response into a typed error.
///
/// Classification uses the status code and the vendor's structured error
/// status, never free-text matching on our side:
/// - 429, or a `RESOURCE_EXHAUSTED` error status, is a rate limit;
/// - 401/403 is an authentication failure;
/// - anything else is a provider error.
pub async fn check_response(provider: &str, resp: Response) -> Result<Response, TalentError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_header = resp
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.text().await.unwrap_or_default();

    Err(classify_failure(provider, status, retry_header.as_deref(), &body))
}

pub fn classify_failure(
    provider: &str,
    status: StatusCode,
    retry_header: Option<&str>,
    body: &str,
) -> TalentError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let vendor_status = error.and_then(|e| e.get("status")).and_then(Value::as_str);
    let message = error
        .and_then(|e| e.get("message").or(Some(e)))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| truncate_error(body.trim()));

    if status == StatusCode::TOO_MANY_REQUESTS || vendor_status == Some("RESOURCE_EXHAUSTED") {
        let retry_after = parse_retry_after(retry_header, Some(body));
        return TalentError::rate_limited(format!("{} quota exhausted: {}", provider, message), retry_after);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return TalentError::Authentication(format!("{} rejected the API key ({}): {}", provider, status, message));
    }

    TalentError::Provider(format!("{} returned {}: {}", provider, status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_is_rate_limit_with_header() {
        let err = classify_failure("gemini", StatusCode::TOO_MANY_REQUESTS, Some("17"), "");
        assert_eq!(err.retry_after_secs(), Some(17));
    }

    #[test]
    fn test_resource_exhausted_status() {
        let body = r#"{"error":{"code":403,"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded. Please retry in 21.4s."}}"#;
        let err = classify_failure("gemini", StatusCode::FORBIDDEN, None, body);
        assert_eq!(err.retry_after_secs(), Some(22));
    }

    #[test]
    fn test_unauthorized() {
        let err = classify_failure("perplexity", StatusCode::UNAUTHORIZED, None, "{\"error\":{\"message\":\"bad key\"}}");
        assert!(matches!(err, TalentError::Authentication(m) if m.contains("bad key")));
    }

    #[test]
    fn test_server_error_is_provider_error() {
        let err = classify_failure("gemini", StatusCode::INTERNAL_SERVER_ERROR, None, "upstream exploded");
        assert!(matches!(err, TalentError::Provider(m) if m.contains("upstream exploded")));
    }

    #[test]
    fn test_quota_word_in_plain_500_is_not_rate_limit() {
        let err = classify_failure("gemini", StatusCode::INTERNAL_SERVER_ERROR, None, "quota service unavailable");
        assert!(err.retry_after_secs().is_none());
    }
}
