use std::path::Path;
use crate::errors::TalentError;
use super::types::TalentConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<TalentConfig, TalentError> {
    if !path.exists() {
        return Err(TalentError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(TalentError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Load the config file if one was given, otherwise run on defaults.
pub async fn load_config(path: Option<&Path>) -> Result<TalentConfig, TalentError> {
    match path {
        Some(p) => parse_config(p).await,
        None => Ok(TalentConfig::default()),
    }
}

pub fn parse_config_str(content: &str) -> Result<TalentConfig, TalentError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file is a valid, all-defaults config.
    if yaml.is_null() {
        return Ok(TalentConfig::default());
    }

    validate_schema(&yaml)?;

    let config: TalentConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), TalentError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| TalentError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| TalentError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory: typed deserialization below is the hard gate.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &TalentConfig) -> Result<(), TalentError> {
    if let Some(providers) = &config.providers {
        if let Some(secondary) = &providers.secondary {
            if secondary.provider == providers.primary.provider && secondary.model == providers.primary.model {
                return Err(TalentError::Config(format!(
                    "Secondary provider is identical to primary ({}); fallback would repeat the same call",
                    secondary.provider
                )));
            }
        }
        if providers.timeout_secs == 0 {
            return Err(TalentError::Config("providers.timeout_secs must be greater than 0".into()));
        }
    }

    if let Some(research) = &config.research {
        if research.enabled && research.max_context_chars == 0 {
            return Err(TalentError::Config("research.max_context_chars must be greater than 0".into()));
        }
        if research.enabled && research.timeout_secs == 0 {
            return Err(TalentError::Config("research.timeout_secs must be greater than 0".into()));
        }
    }

    if let Some(cache) = &config.cache {
        if cache.enabled && cache.ttl_secs == 0 {
            return Err(TalentError::Config("cache.ttl_secs must be greater than 0".into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheBackendKind;
    use crate::llm::FallbackPolicy;

    #[test]
    fn test_full_config() {
        let yaml = r#"
providers:
  primary:
    provider: gemini
    model: gemini-2.5-pro
    api_key: $GEMINI_API_KEY
  secondary:
    provider: perplexity
  fallback_policy: quota_only
research:
  enabled: false
cache:
  backend: database
  ttl_secs: 3600
server:
  port: 9000
"#;
        let config = parse_config_str(yaml).unwrap();
        let providers = config.providers();
        assert_eq!(providers.primary.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(providers.fallback_policy, FallbackPolicy::QuotaOnly);
        assert!(providers.sentiment.is_none());
        assert!(!config.research().enabled);
        assert_eq!(config.cache().backend, CacheBackendKind::Database);
        assert_eq!(config.server().port, 9000);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config_str("").unwrap();
        assert!(config.providers.is_none());
    }

    #[test]
    fn test_identical_secondary_rejected() {
        let yaml = "providers:\n  primary:\n    provider: gemini\n  secondary:\n    provider: gemini\n";
        assert!(matches!(parse_config_str(yaml), Err(TalentError::Config(_))));
    }

    #[test]
    fn test_same_provider_different_model_allowed() {
        let yaml = "providers:\n  primary:\n    provider: gemini\n  secondary:\n    provider: gemini\n    model: gemini-2.5-pro\n";
        assert!(parse_config_str(yaml).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(parse_config_str("cache:\n  ttl_secs: 0\n").is_err());
    }

    #[test]
    fn test_zero_research_timeout_rejected() {
        let err = parse_config_str("research:\n  timeout_secs: 0\n").unwrap_err();
        assert!(err.to_string().contains("research.timeout_secs"));
        assert!(parse_config_str("research:\n  enabled: false\n  timeout_secs: 0\n").is_ok());
    }

    #[test]
    fn test_bad_type_is_error() {
        assert!(parse_config_str("server:\n  port: not-a-port\n").is_err());
    }

    #[tokio::test]
    async fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talentscope.yaml");
        std::fs::write(&path, "research:\n  timeout_secs: 5\n").unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.research().timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = parse_config(Path::new("/nonexistent/talentscope.yaml")).await.unwrap_err();
        assert!(matches!(err, TalentError::Config(_)));
    }
}
