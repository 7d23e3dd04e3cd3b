use std::sync::Arc;
use std::time::Duration;
use crate::config::ProviderConfig;
use crate::config::credentials::resolve_api_key;
use crate::errors::TalentError;
use super::provider::LLMProvider;
use super::gemini::GeminiProvider;
use super::perplexity::PerplexityProvider;
use super::catalog;

pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn LLMProvider>, TalentError> {
    if api_key.is_empty() {
        let env_var = catalog::get_provider(provider_name).map(|p| p.env_var).unwrap_or("an API key");
        return Err(TalentError::Config(format!(
            "No API key for provider '{}': set {} or providers.*.api_key",
            provider_name, env_var
        )));
    }

    match provider_name {
        "gemini" => {
            let mut p = GeminiProvider::new(api_key, model, timeout)?;
            if let Some(url) = base_url {
                p = p.with_base_url(url);
            }
            Ok(Arc::new(p))
        }
        "perplexity" => {
            let mut p = PerplexityProvider::new(api_key, model, timeout)?;
            if let Some(url) = base_url {
                p = p.with_base_url(url);
            }
            Ok(Arc::new(p))
        }
        _ => Err(TalentError::Config(format!("Unknown LLM provider: {}", provider_name))),
    }
}

/// Build a provider from its config section, resolving the API key.
pub fn provider_from_config(cfg: &ProviderConfig, timeout: Duration) -> Result<Arc<dyn LLMProvider>, TalentError> {
    let api_key = resolve_api_key(&cfg.provider, cfg.api_key.as_deref());
    create_provider(&cfg.provider, &api_key, cfg.model.as_deref(), cfg.base_url.as_deref(), timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_providers() {
        let t = Duration::from_secs(5);
        let p = create_provider("gemini", "key", None, None, t).unwrap();
        assert_eq!(p.provider_name(), "gemini");
        assert_eq!(p.model_name(), "gemini-2.5-flash");
        let p = create_provider("perplexity", "key", Some("sonar"), None, t).unwrap();
        assert_eq!(p.model_name(), "sonar");
    }

    #[test]
    fn test_unknown_provider() {
        let err = create_provider("openai", "key", None, None, Duration::from_secs(5)).err().unwrap();
        assert!(matches!(err, TalentError::Config(_)));
    }

    #[test]
    fn test_missing_key() {
        let err = create_provider("gemini", "", None, None, Duration::from_secs(5)).err().unwrap();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
