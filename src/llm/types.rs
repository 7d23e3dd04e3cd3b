use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: String,
    /// Source URLs the provider cited, when it searches the web.
    #[serde(default)]
    pub citations: Vec<String>,
}
