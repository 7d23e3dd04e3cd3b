pub mod builder;
pub mod templates;

pub use builder::{build_analysis_prompt, build_sentiment_prompt, Prompt, PromptVariables};
