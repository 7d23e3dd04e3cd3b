pub mod analysis;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod research;
pub mod utils;

/// Version string shown by `--version`.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);
