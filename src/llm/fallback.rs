use std::sync::Arc;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::errors::TalentError;
use super::provider::LLMProvider;
use super::types::LLMResponse;

/// Which primary failures allow the secondary provider to be tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Network, non-2xx, authentication and quota failures all fall back.
    #[default]
    AnyError,
    /// Only rate-limit/quota failures fall back.
    QuotaOnly,
}

impl FallbackPolicy {
    pub fn should_fall_back(&self, err: &TalentError) -> bool {
        let class = err.classify();
        match self {
            FallbackPolicy::AnyError => class.provider_failure,
            FallbackPolicy::QuotaOnly => class.quota,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    NotStarted,
    PrimaryInFlight,
    PrimaryFailed,
    SecondaryInFlight,
    Success,
    BothFailed,
}

impl CallState {
    fn can_move_to(self, next: CallState) -> bool {
        use CallState::*;
        matches!(
            (self, next),
            (NotStarted, PrimaryInFlight)
                | (PrimaryInFlight, Success)
                | (PrimaryInFlight, PrimaryFailed)
                | (PrimaryFailed, SecondaryInFlight)
                | (PrimaryFailed, BothFailed)
                | (SecondaryInFlight, Success)
                | (SecondaryInFlight, BothFailed)
        )
    }
}

/// Successful call, with the provider that answered.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub response: LLMResponse,
    pub provider: String,
    pub used_fallback: bool,
    pub states: Vec<CallState>,
}

impl CallOutcome {
    /// Label recorded on reports, e.g. "gemini" or "perplexity (fallback)".
    pub fn provider_label(&self) -> String {
        if self.used_fallback {
            format!("{} (fallback)", self.provider)
        } else {
            self.provider.clone()
        }
    }
}

/// Terminal failure of the primary/secondary sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    RateLimited { retry_after_secs: u64, message: String },
    Unrecoverable { message: String },
}

impl From<CallFailure> for TalentError {
    fn from(failure: CallFailure) -> Self {
        match failure {
            CallFailure::RateLimited { retry_after_secs, message } => TalentError::rate_limited(message, retry_after_secs),
            CallFailure::Unrecoverable { message } => TalentError::Provider(message),
        }
    }
}

/// Calls the primary provider, then the secondary once if policy allows.
/// There is no retry loop beyond that single swap.
#[derive(Clone)]
pub struct FallbackCaller {
    primary: Arc<dyn LLMProvider>,
    secondary: Option<Arc<dyn LLMProvider>>,
    policy: FallbackPolicy,
}

struct Tracker {
    states: Vec<CallState>,
}

impl Tracker {
    fn new() -> Self {
        Self { states: vec![CallState::NotStarted] }
    }

    fn current(&self) -> CallState {
        *self.states.last().unwrap_or(&CallState::NotStarted)
    }

    fn advance(&mut self, next: CallState) {
        let from = self.current();
        debug_assert!(from.can_move_to(next), "illegal transition {:?} -> {:?}", from, next);
        debug!(from = ?from, to = ?next, "Provider call state");
        self.states.push(next);
    }
}

impl FallbackCaller {
    pub fn new(primary: Arc<dyn LLMProvider>, secondary: Option<Arc<dyn LLMProvider>>, policy: FallbackPolicy) -> Self {
        Self { primary, secondary, policy }
    }

    pub fn primary(&self) -> &dyn LLMProvider {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&dyn LLMProvider> {
        self.secondary.as_deref()
    }

    pub async fn call(&self, prompt: &str, system: Option<&str>) -> Result<CallOutcome, CallFailure> {
        let mut tracker = Tracker::new();

        tracker.advance(CallState::PrimaryInFlight);
        let primary_err = match timed_complete(self.primary.as_ref(), prompt, system).await {
            Ok(response) => {
                tracker.advance(CallState::Success);
                return Ok(CallOutcome {
                    response,
                    provider: self.primary.provider_name().to_string(),
                    used_fallback: false,
                    states: tracker.states,
                });
            }
            Err(e) => e,
        };
        tracker.advance(CallState::PrimaryFailed);

        let secondary = match &self.secondary {
            Some(s) if self.policy.should_fall_back(&primary_err) => s,
            Some(_) => {
                warn!(error = %primary_err, policy = ?self.policy, "Primary failure not eligible for fallback");
                tracker.advance(CallState::BothFailed);
                return Err(final_failure(&[&primary_err]));
            }
            None => {
                tracker.advance(CallState::BothFailed);
                return Err(final_failure(&[&primary_err]));
            }
        };

        warn!(
            primary = self.primary.provider_name(),
            secondary = secondary.provider_name(),
            error = %primary_err,
            "Primary provider failed, falling back"
        );

        tracker.advance(CallState::SecondaryInFlight);
        match timed_complete(secondary.as_ref(), prompt, system).await {
            Ok(response) => {
                tracker.advance(CallState::Success);
                Ok(CallOutcome {
                    response,
                    provider: secondary.provider_name().to_string(),
                    used_fallback: true,
                    states: tracker.states,
                })
            }
            Err(secondary_err) => {
                tracker.advance(CallState::BothFailed);
                warn!(error = %secondary_err, "Secondary provider failed");
                Err(final_failure(&[&primary_err, &secondary_err]))
            }
        }
    }
}

async fn timed_complete(
    provider: &dyn LLMProvider,
    prompt: &str,
    system: Option<&str>,
) -> Result<LLMResponse, TalentError> {
    let started = Instant::now();
    let result = provider.complete(prompt, system).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(resp) => info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            elapsed_ms,
            output_tokens = resp.output_tokens,
            "Provider call succeeded"
        ),
        Err(e) => warn!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            elapsed_ms,
            error = %e,
            "Provider call failed"
        ),
    }
    result
}

/// Rate limited if any attempt was rate limited (soonest retry wins),
/// otherwise unrecoverable with the last error's message.
fn final_failure(errors: &[&TalentError]) -> CallFailure {
    let soonest = errors.iter().filter_map(|e| e.retry_after_secs()).min();
    let last = errors.last().map(|e| e.to_string()).unwrap_or_default();

    match soonest {
        Some(retry_after_secs) => CallFailure::RateLimited {
            retry_after_secs,
            message: "All configured AI providers are rate limited".to_string(),
        },
        None => CallFailure::Unrecoverable { message: last },
    }
}
