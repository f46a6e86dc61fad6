/// Database connection and table creation
pub mod database;

/// Catalog seed data loading from config.toml
pub mod catalog;
