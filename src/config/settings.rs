//! Application settings loading from config.toml and the environment.
//!
//! The configuration file is optional; every field has a default. The
//! document path can additionally be overridden with the
//! `PANTRY_BUDDY_DATA` environment variable, which wins over the file.

use crate::config::thresholds::AlertThresholds;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the persisted document.
const DEFAULT_DATA_PATH: &str = "data/pantry_buddy.json";

/// Resolved application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Where the persisted document lives
    pub data_path: PathBuf,
    /// Alert tuning constants
    pub thresholds: AlertThresholds,
}

/// Shape of config.toml. Everything is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_path: Option<PathBuf>,
    #[serde(default)]
    thresholds: Option<AlertThresholds>,
}

fn parse_file_config(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from an explicit path.
///
/// A missing file yields the defaults; a present but malformed file is an
/// error rather than a silent fallback.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_configuration_from<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let file_config = if path.as_ref().exists() {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
            message: format!("Failed to read config file: {e}"),
        })?;
        parse_file_config(&contents)?
    } else {
        debug!("No config file at {:?}, using defaults", path.as_ref());
        FileConfig::default()
    };

    let data_path = match std::env::var("PANTRY_BUDDY_DATA") {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => file_config
            .data_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
    };

    info!("Using data path {:?}", data_path);

    Ok(AppConfig {
        data_path,
        thresholds: file_config.thresholds.unwrap_or_default(),
    })
}

/// Loads configuration from the default location (./config.toml).
///
/// # Errors
/// Returns an error if config.toml exists but cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    load_configuration_from("config.toml")
}
