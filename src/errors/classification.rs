use super::types::TalentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassification {
    /// Stable code surfaced to API clients.
    pub code: &'static str,
    /// Whether a secondary provider may be tried after this failure.
    pub provider_failure: bool,
    pub quota: bool,
}

impl TalentError {
    /// Classify this error into its client-facing code and provider-failure kind.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            TalentError::RateLimit { .. } => ErrorClassification {
                code: "RATE_LIMITED",
                provider_failure: true,
                quota: true,
            },
            TalentError::Provider(_) => ErrorClassification {
                code: "PROVIDER_ERROR",
                provider_failure: true,
                quota: false,
            },
            TalentError::Network(_) => ErrorClassification {
                code: "PROVIDER_ERROR",
                provider_failure: true,
                quota: false,
            },
            TalentError::Authentication(_) => ErrorClassification {
                code: "PROVIDER_ERROR",
                provider_failure: true,
                quota: false,
            },
            TalentError::MalformedOutput(_) => ErrorClassification {
                code: "ANALYSIS_FAILED",
                provider_failure: false,
                quota: false,
            },
            TalentError::Validation(_) => ErrorClassification {
                code: "VALIDATION_ERROR",
                provider_failure: false,
                quota: false,
            },
            TalentError::NotFound(_) => ErrorClassification {
                code: "NOT_FOUND",
                provider_failure: false,
                quota: false,
            },
            TalentError::Config(_) => ErrorClassification {
                code: "CONFIG_ERROR",
                provider_failure: false,
                quota: false,
            },
            TalentError::Database(_)
            | TalentError::Io(_)
            | TalentError::Json(_)
            | TalentError::Yaml(_)
            | TalentError::Internal(_) => ErrorClassification {
                code: "INTERNAL_ERROR",
                provider_failure: false,
                quota: false,
            },
        }
    }
}
