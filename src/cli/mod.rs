pub mod analyze;
pub mod commands;
pub mod reports;
pub mod serve;

pub use commands::{Cli, Commands};

use std::path::Path;
use crate::config::TalentConfig;
use crate::errors::TalentError;

pub async fn load(config: Option<&str>) -> Result<TalentConfig, TalentError> {
    crate::config::load_config(config.map(Path::new)).await
}
