use serde::{Deserialize, Serialize};
use crate::llm::FallbackPolicy;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TalentConfig {
    pub providers: Option<ProvidersConfig>,
    pub research: Option<ResearchConfig>,
    pub cache: Option<CacheConfig>,
    pub server: Option<ServerConfig>,
}

impl TalentConfig {
    pub fn providers(&self) -> ProvidersConfig {
        self.providers.clone().unwrap_or_default()
    }

    pub fn research(&self) -> ResearchConfig {
        self.research.clone().unwrap_or_default()
    }

    pub fn cache(&self) -> CacheConfig {
        self.cache.clone().unwrap_or_default()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProviderConfig {
    pub provider: String,
    pub model: Option<String>,
    /// Literal key or `$ENV_VAR` reference; defaults to the provider's env var.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn named(provider: &str) -> Self {
        Self { provider: provider.to_string(), model: None, api_key: None, base_url: None }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    pub primary: ProviderConfig,
    pub secondary: Option<ProviderConfig>,
    /// Search provider used for verified review data.
    pub sentiment: Option<ProviderConfig>,
    #[serde(default)]
    pub fallback_policy: FallbackPolicy,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            primary: ProviderConfig::named("gemini"),
            secondary: Some(ProviderConfig::named("perplexity")),
            sentiment: Some(ProviderConfig { model: Some("sonar".to_string()), ..ProviderConfig::named("perplexity") }),
            fallback_policy: FallbackPolicy::AnyError,
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_llm_timeout() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearchConfig {
    pub enabled: bool,
    pub jina_base_url: String,
    pub max_context_chars: usize,
    pub timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jina_base_url: "https://r.jina.ai".to_string(),
            max_context_chars: 6_000,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    #[default]
    Memory,
    Database,
}

impl CacheBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Database => "database",
        }
    }
}

impl std::fmt::Display for CacheBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub backend: CacheBackendKind,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true, backend: CacheBackendKind::Memory, ttl_secs: 86_400 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db: "./data/talentscope.db".to_string(),
        }
    }
}
