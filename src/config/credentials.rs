use tracing::debug;
use crate::llm::catalog;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set");
                String::new()
            }
        }
    } else {
        value.to_string()
    }
}

/// API key for a provider: the configured value if any, else the provider's
/// catalog environment variable. Empty when nothing is set.
pub fn resolve_api_key(provider: &str, configured: Option<&str>) -> String {
    match configured {
        Some(value) if !value.trim().is_empty() => resolve_credential(value.trim()),
        _ => catalog::get_provider(provider)
            .and_then(|p| std::env::var(p.env_var).ok())
            .unwrap_or_default(),
    }
}

/// Redact sensitive values in a string. Replaces known credential values
/// with [REDACTED].
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if !secret.is_empty() && secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("abc123"), "abc123");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_TALENTSCOPE_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_TALENTSCOPE_CRED"), "secret123");
        std::env::remove_var("TEST_TALENTSCOPE_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var_is_empty() {
        assert_eq!(resolve_credential("$NONEXISTENT_TALENTSCOPE_VAR"), "");
    }

    #[test]
    fn test_resolve_api_key_prefers_configured() {
        assert_eq!(resolve_api_key("gemini", Some("literal-key")), "literal-key");
    }

    #[test]
    fn test_resolve_api_key_unknown_provider_without_config() {
        assert_eq!(resolve_api_key("nonexistent", None), "");
    }

    #[test]
    fn test_redact_credentials() {
        let text = "request to ?key=AIzaSecret123 failed";
        let redacted = redact_credentials(text, &["AIzaSecret123", "ab"]);
        assert_eq!(redacted, "request to ?key=[REDACTED] failed");
    }
}
