pub mod fetcher;
pub mod html;
pub mod sentiment;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use fetcher::WebResearcher;
pub use sentiment::{SentimentResearcher, SentimentSource};

/// Readable text from one page, labelled with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSnippet {
    pub source: String,
    pub url: String,
    pub text: String,
}

/// Gathers context about a company website. Never fails: pages that cannot
/// be fetched are skipped.
#[async_trait]
pub trait ResearchSource: Send + Sync {
    async fn gather(&self, company_url: &str) -> Vec<ResearchSnippet>;
}
