pub mod types;
pub mod classification;
pub mod retry_hint;

pub use types::TalentError;
pub use classification::ErrorClassification;
pub use retry_hint::{parse_retry_after, DEFAULT_RETRY_AFTER_SECS};
