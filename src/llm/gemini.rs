use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::TalentError;
use super::http::check_response;
use super::provider::LLMProvider;
use super::types::LLMResponse;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: Option<&str>, timeout: Duration) -> Result<Self, TalentError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TalentError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.unwrap_or("gemini-2.5-flash").to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, TalentError> {
        let mut body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": 0.4,
                "maxOutputTokens": 8192,
                "responseMimeType": "application/json",
            }
        });
        if let Some(sys) = system {
            body["systemInstruction"] = json!({"parts": [{"text": sys}]});
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let resp = self.client.post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TalentError::Network(format!("Gemini request failed: {}", e)))?;

        let resp = check_response("gemini", resp).await?;

        let data: Value = resp.json().await
            .map_err(|e| TalentError::Provider(format!("Gemini response parse error: {}", e)))?;

        extract_gemini_response(&data, &self.model)
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}

fn extract_gemini_response(data: &Value, model: &str) -> Result<LLMResponse, TalentError> {
    if let Some(error) = data.get("error") {
        return Err(TalentError::Provider(
            error["message"].as_str().unwrap_or("Unknown Gemini error").to_string(),
        ));
    }

    let parts = data["candidates"][0]["content"]["parts"].as_array();
    let content: String = parts
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if content.trim().is_empty() {
        let reason = data["candidates"][0]["finishReason"]
            .as_str()
            .or_else(|| data["promptFeedback"]["blockReason"].as_str())
            .unwrap_or("empty response");
        return Err(TalentError::Provider(format!("Gemini returned no content ({})", reason)));
    }

    let citations = data["candidates"][0]["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| {
            chunks.iter()
                .filter_map(|c| c["web"]["uri"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Ok(LLMResponse {
        content,
        input_tokens: data["usageMetadata"]["promptTokenCount"].as_u64(),
        output_tokens: data["usageMetadata"]["candidatesTokenCount"].as_u64(),
        model: model.to_string(),
        citations,
    })
}
