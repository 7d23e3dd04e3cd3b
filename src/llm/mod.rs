pub mod provider;
pub mod gemini;
pub mod perplexity;
pub mod http;
pub mod router;
pub mod types;
pub mod catalog;
pub mod fallback;

pub use provider::LLMProvider;
pub use router::{create_provider, provider_from_config};
pub use types::LLMResponse;
pub use fallback::{CallFailure, CallOutcome, CallState, FallbackCaller, FallbackPolicy};
