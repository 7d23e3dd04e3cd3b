pub mod connection;
pub mod reports;
pub mod schema;
pub mod settings;

pub use connection::Database;
