//! Application configuration loaded from config.toml and the environment.
//!
//! Every setting has a default, so a missing config file is not an error. Environment
//! variables (usually supplied through `.env`) override values from the file.

use super::catalog::CategoryCatalog;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Base URL of the hosted API
pub const DEFAULT_BASE_URL: &str = "https://us-central1-sales-app-3753e.cloudfunctions.net/api";

/// Default location of the session token file
pub const DEFAULT_SESSION_FILE: &str = ".barstock_session";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_VAR: &str = "BARSTOCK_CONFIG";
/// Environment variable overriding `[api] base_url`
pub const BASE_URL_VAR: &str = "API_BASE_URL";
/// Environment variable overriding `session_file`
pub const SESSION_FILE_VAR: &str = "BARSTOCK_SESSION_FILE";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_FILE)
}

/// `[api]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Whole config.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CategoryCatalog,
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            catalog: CategoryCatalog::default(),
            session_file: default_session_file(),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides using `lookup` to read variables.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(path) = lookup(SESSION_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            self.session_file = PathBuf::from(path.trim());
        }
        self
    }
}

/// Parses a config file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads the configuration the binary runs with.
///
/// Reads `BARSTOCK_CONFIG` (default `config.toml`); when that file does not exist
/// the defaults are used. Environment overrides are applied last.
///
/// # Errors
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!("No config file at {path}, using defaults");
        AppConfig::default()
    };

    let config = config.with_overrides(|key| std::env::var(key).ok());
    info!("Using API at {}", config.api.base_url);
    Ok(config)
}
