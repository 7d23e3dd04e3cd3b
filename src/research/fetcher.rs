use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};
use crate::config::ResearchConfig;
use crate::errors::TalentError;
use crate::utils::truncation::{collapse_whitespace, truncate_chars};
use super::html::extract_readable_text;
use super::{ResearchSnippet, ResearchSource};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Pages fetched per company, relative to its website.
const PAGES: &[&str] = &["", "careers"];

/// Minimum useful page text; shorter bodies are treated as failed fetches.
const MIN_TEXT_CHARS: usize = 80;

/// Fetches company pages through the Jina reader proxy, falling back to a
/// direct fetch with local HTML text extraction.
pub struct WebResearcher {
    client: Client,
    jina_base_url: String,
    max_context_chars: usize,
}

impl WebResearcher {
    pub fn new(config: &ResearchConfig) -> Result<Self, TalentError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TalentError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            jina_base_url: config.jina_base_url.trim_end_matches('/').to_string(),
            max_context_chars: config.max_context_chars,
        })
    }

    async fn fetch_page(&self, url: &Url) -> Result<ResearchSnippet, TalentError> {
        match self.fetch_via_jina(url).await {
            Ok(text) => return Ok(ResearchSnippet { source: "jina".into(), url: url.to_string(), text }),
            Err(e) => debug!(url = %url, error = %e, "Jina reader failed, trying direct fetch"),
        }

        let text = self.fetch_direct(url).await?;
        Ok(ResearchSnippet { source: "direct".into(), url: url.to_string(), text })
    }

    async fn fetch_via_jina(&self, url: &Url) -> Result<String, TalentError> {
        let proxy_url = format!("{}/{}", self.jina_base_url, url);
        let resp = self.client
            .get(&proxy_url)
            .header("X-Return-Format", "text")
            .send()
            .await
            .map_err(|e| TalentError::Network(format!("Jina request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(TalentError::Network(format!("Jina returned {}", resp.status())));
        }

        let body = resp.text().await
            .map_err(|e| TalentError::Network(format!("Jina body read failed: {}", e)))?;
        usable_text(collapse_whitespace(&body))
    }

    async fn fetch_direct(&self, url: &Url) -> Result<String, TalentError> {
        let resp = self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TalentError::Network(format!("Direct fetch failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(TalentError::Network(format!("Direct fetch returned {}", resp.status())));
        }

        let html = resp.text().await
            .map_err(|e| TalentError::Network(format!("Direct body read failed: {}", e)))?;
        usable_text(extract_readable_text(&html))
    }
}

fn usable_text(text: String) -> Result<String, TalentError> {
    if text.chars().count() < MIN_TEXT_CHARS {
        Err(TalentError::Network("Page returned too little readable text".into()))
    } else {
        Ok(text)
    }
}

/// URLs to research for a company website.
pub fn research_urls(company_url: &str) -> Vec<Url> {
    let Ok(base) = Url::parse(company_url) else {
        return Vec::new();
    };
    PAGES
        .iter()
        .filter_map(|page| if page.is_empty() { Some(base.clone()) } else { base.join(&format!("/{}", page)).ok() })
        .collect()
}

#[async_trait]
impl ResearchSource for WebResearcher {
    async fn gather(&self, company_url: &str) -> Vec<ResearchSnippet> {
        let urls = research_urls(company_url);
        if urls.is_empty() {
            return Vec::new();
        }
        let per_page = (self.max_context_chars / urls.len()).max(1);

        let mut snippets = Vec::new();
        for url in &urls {
            match self.fetch_page(url).await {
                Ok(mut snippet) => {
                    snippet.text = truncate_chars(&snippet.text, per_page);
                    snippets.push(snippet);
                }
                Err(e) => warn!(url = %url, error = %e, "Research fetch failed, continuing without it"),
            }
        }
        info!(company_url, pages = snippets.len(), "Research context gathered");
        snippets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_urls() {
        let urls = research_urls("https://acme.example/about");
        let urls: Vec<String> = urls.iter().map(|u| u.to_string()).collect();
        assert_eq!(urls, vec!["https://acme.example/about", "https://acme.example/careers"]);
    }

    #[test]
    fn test_research_urls_invalid() {
        assert!(research_urls("not a url").is_empty());
    }

    #[test]
    fn test_usable_text_threshold() {
        assert!(usable_text("short".into()).is_err());
        assert!(usable_text("x".repeat(MIN_TEXT_CHARS)).is_ok());
    }

    #[test]
    fn test_new_trims_base_url() {
        let cfg = ResearchConfig { jina_base_url: "https://r.jina.ai/".into(), ..Default::default() };
        let r = WebResearcher::new(&cfg).unwrap();
        assert_eq!(r.jina_base_url, "https://r.jina.ai");
    }
}
