// Configuration loading and parsing (config/auction.toml).
//
// Run configuration covers the data path and report shape only. Franchise
// purses and score weights are fixed constants of the model and deliberately
// not configurable here.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire auction.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataSection,
    #[serde(default)]
    report: ReportSection,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    auction_csv: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSection {
    /// Leaderboard rows to print; 0 means all of them.
    #[serde(default)]
    pub top_n: usize,
    /// Restrict the printed leaderboard to one role.
    #[serde(default)]
    pub role: Option<String>,
}

/// The assembled run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub auction_csv: String,
    pub report: ReportSection,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/auction.toml` relative to
/// the given base directory.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config/auction.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        auction_csv: file.data.auction_csv,
        report: file.report,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/auction.toml` exists by copying it from `defaults/` on
/// first run. Returns the copied path, or `None` if the file already existed.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config/auction.toml");
    if target.exists() {
        return Ok(None);
    }

    let default = base_dir.join("defaults/auction.toml");
    if !default.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/auction.toml nor defaults/auction.toml found in {}; \
                 run from the project root or create the config file",
                base_dir.display()
            ),
        });
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create config directory: {e}"),
        })?;
    }
    std::fs::copy(&default, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default.display()),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying the default config file first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.auction_csv.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.auction_csv".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(role) = &config.report.role {
        if role.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "report.role".into(),
                message: "must not be empty when present; omit it to show all roles".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
