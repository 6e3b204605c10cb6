/// Application settings from config.toml and environment overrides
pub mod app;

/// Item category catalog from the `[catalog]` table
pub mod catalog;

/// Session token file handling
pub mod session;

pub use app::{AppConfig, load_app_configuration};
pub use catalog::CategoryCatalog;
