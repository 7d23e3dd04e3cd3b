pub mod analyze;
pub mod health;
pub mod reports;
pub mod settings;
