pub mod assembler;
pub mod fields;
pub mod grounding;
pub mod normalizer;
pub mod parser;
pub mod sentiment;

pub use assembler::{assemble_report, AssemblyInput};
pub use parser::parse_provider_json;
pub use sentiment::{normalize_sentiment, VerifiedSentiment};
