//! Configuration loading functionality.
//!
//! Handles locating the configuration file, parsing it, and applying the
//! environment overrides.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::validation::{validate_config, validate_provider_requirements};
use super::{API_KEY_ENV_VAR, CONFIG_DIR_ENV_VAR, Config};
use crate::error::SunbarError;

/// Load configuration using automatic path detection.
///
/// Unlike most tools, sunbar never writes a default file: a missing
/// configuration simply yields the defaults.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        load_from_path(&config_path)?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);
    validate_provider_requirements(&config)?;

    Ok(config)
}

/// Load configuration from a specific path without environment overrides.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| SunbarError::Config(format!("cannot read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| SunbarError::Config(format!("cannot parse {}: {e}", path.display())))?;

    validate_config(&config)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
}

/// Get the configuration file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = std::env::var_os(CONFIG_DIR_ENV_VAR).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(custom_dir).join("sunbar.toml"));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| SunbarError::Config("could not determine config directory".into()))?;
    Ok(config_dir.join("sunbar").join("sunbar.toml"))
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR)
        && !key.trim().is_empty()
    {
        config.api_key = Some(key.trim().to_string());
    }
}
