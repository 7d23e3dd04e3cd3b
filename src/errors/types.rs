use thiserror::Error;

#[derive(Debug, Error)]
pub enum TalentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {message} (retry after {retry_after_secs}s)")]
    RateLimit {
        message: String,
        retry_after_secs: u64,
    },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider output: {0}")]
    MalformedOutput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TalentError {
    pub fn rate_limited(message: impl Into<String>, retry_after_secs: u64) -> Self {
        TalentError::RateLimit {
            message: message.into(),
            retry_after_secs,
        }
    }

    /// Seconds the caller should wait before retrying, for rate-limit errors.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            TalentError::RateLimit { retry_after_secs, .. } => Some(*retry_after_secs),
            _ => None,
        }
    }
}
