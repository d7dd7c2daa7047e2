/// Database configuration and connection management
pub mod database;

/// Product catalog loading from config.toml
pub mod catalog;
