use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::TalentError;
use super::http::check_response;
use super::provider::LLMProvider;
use super::types::LLMResponse;

const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Perplexity's OpenAI-compatible chat endpoint with live web search.
pub struct PerplexityProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl PerplexityProvider {
    pub fn new(api_key: &str, model: Option<&str>, timeout: Duration) -> Result<Self, TalentError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TalentError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.unwrap_or("sonar-pro").to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LLMProvider for PerplexityProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, TalentError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.2,
            "max_tokens": 4096,
        });

        let resp = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| TalentError::Network(format!("Perplexity request failed: {}", e)))?;

        let resp = check_response("perplexity", resp).await?;

        let data: Value = resp.json().await
            .map_err(|e| TalentError::Provider(format!("Perplexity response parse error: {}", e)))?;

        extract_chat_response(&data, &self.model)
    }

    fn provider_name(&self) -> &str { "perplexity" }
    fn model_name(&self) -> &str { &self.model }
}

fn extract_chat_response(data: &Value, model: &str) -> Result<LLMResponse, TalentError> {
    if let Some(error) = data.get("error") {
        return Err(TalentError::Provider(
            error["message"].as_str().unwrap_or("Unknown Perplexity error").to_string(),
        ));
    }

    let content = data["choices"][0]["message"]["content"].as_str()
        .ok_or_else(|| TalentError::Provider("No content in Perplexity response".into()))?
        .to_string();

    let citations = data["citations"]
        .as_array()
        .map(|c| c.iter().filter_map(|u| u.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    Ok(LLMResponse {
        content,
        input_tokens: data["usage"]["prompt_tokens"].as_u64(),
        output_tokens: data["usage"]["completion_tokens"].as_u64(),
        model: model.to_string(),
        citations,
    })
}
