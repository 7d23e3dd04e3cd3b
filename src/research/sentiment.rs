use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::analysis::{normalize_sentiment, parse_provider_json, VerifiedSentiment};
use crate::errors::TalentError;
use crate::llm::LLMProvider;
use crate::models::AnalysisRequest;
use crate::prompts::build_sentiment_prompt;

/// Source of verified review data, separate from the generative analysis.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn verified_sentiment(&self, request: &AnalysisRequest) -> Result<VerifiedSentiment, TalentError>;
}

/// Asks a web-search provider for review-site figures.
pub struct SentimentResearcher {
    provider: Arc<dyn LLMProvider>,
}

impl SentimentResearcher {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SentimentSource for SentimentResearcher {
    async fn verified_sentiment(&self, request: &AnalysisRequest) -> Result<VerifiedSentiment, TalentError> {
        let prompt = build_sentiment_prompt(request);
        let response = self.provider.complete(&prompt.user, Some(&prompt.system)).await?;

        // Figures without any citation cannot be checked, so they do not count as verified.
        if response.citations.is_empty() {
            warn!(provider = self.provider.provider_name(), "Sentiment answer had no citations, ignoring");
            return Ok(VerifiedSentiment::default());
        }

        let raw = parse_provider_json(&response.content)?;
        let verified = normalize_sentiment(&raw);
        info!(
            company = %request.company_name,
            reviews = verified.talent.total_reviews,
            rating = verified.talent.aggregated_score,
            citations = response.citations.len(),
            "Verified sentiment gathered"
        );
        Ok(verified)
    }
}
