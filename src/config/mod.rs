mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ServerConfig, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Get the config directory path (~/.config/ml-showcase/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ml-showcase"))
}

/// Get the default config file path (~/.config/ml-showcase/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => match get_config_path() {
            Ok(path) if path.exists() => read_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.server.host.parse::<IpAddr>().is_err() {
        errors.push(format!(
            "server.host: '{}' is not an IP address",
            config.server.host
        ));
    }

    if config.server.port == 0 {
        errors.push("server.port: must be non-zero".to_string());
    }

    for (i, origin) in config.server.cors_origins.iter().enumerate() {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            errors.push(format!(
                "server.cors_origins[{}]: invalid origin '{}'",
                i, origin
            ));
        }
    }

    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "log_level: '{}' must be one of {}",
            config.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
