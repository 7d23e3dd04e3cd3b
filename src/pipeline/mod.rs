pub mod service;
pub mod validation;

pub use service::{AnalysisOutcome, ReportPipeline};
pub use validation::validate_request;
