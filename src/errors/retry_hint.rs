use std::sync::LazyLock;
use regex::Regex;

/// Used when a vendor signals a rate limit without saying how long to wait.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

static RETRY_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)retry (?:in|after) (\d+(?:\.\d+)?)\s*(ms|s|sec|secs|seconds)?").expect("valid regex")
});

/// Work out how long to wait after a rate limit.
///
/// A `Retry-After` header in seconds takes priority; otherwise the vendor
/// error body is searched for a "retry in 35.2s" style hint. Fractions are
/// rounded up so the caller never retries early.
pub fn parse_retry_after(header: Option<&str>, body: Option<&str>) -> u64 {
    if let Some(secs) = header.and_then(|h| h.trim().parse::<u64>().ok()) {
        return secs.max(1);
    }

    if let Some(caps) = body.and_then(|b| RETRY_IN_RE.captures(b)) {
        if let Ok(value) = caps[1].parse::<f64>() {
            let secs = match caps.get(2).map(|m| m.as_str()) {
                Some("ms") => value / 1000.0,
                _ => value,
            };
            return (secs.ceil() as u64).max(1);
        }
    }

    DEFAULT_RETRY_AFTER_SECS
}
