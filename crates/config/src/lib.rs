#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for bitcheck
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/bitcheck/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use crate::core::{CheckConfig, GeneralConfig, PathConfig};
pub use constants as fixed_paths;

use bitcheck_errors::{ConfigError, Error};
use bitcheck_types::{ColorChoice, OutputFormat, WarningKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(fixed_paths::APP_DIR)
            .join(fixed_paths::CONFIG_FILE))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // BITCHECK_OUTPUT
        if let Ok(output) = std::env::var("BITCHECK_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "BITCHECK_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // BITCHECK_COLOR
        if let Ok(color) = std::env::var("BITCHECK_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "BITCHECK_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // BITCHECK_INTEGRITY
        if let Ok(integrity) = std::env::var("BITCHECK_INTEGRITY") {
            self.check.integrity = parse_bool("BITCHECK_INTEGRITY", integrity)?;
        }

        // BITCHECK_JOBS
        if let Ok(jobs) = std::env::var("BITCHECK_JOBS") {
            self.check.jobs = jobs.parse().map_err(|_| ConfigError::InvalidValue {
                field: "BITCHECK_JOBS".to_string(),
                value: jobs,
            })?;
        }

        // BITCHECK_TOOL_TIMEOUT
        if let Ok(timeout) = std::env::var("BITCHECK_TOOL_TIMEOUT") {
            let seconds: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                field: "BITCHECK_TOOL_TIMEOUT".to_string(),
                value: timeout,
            })?;
            self.check.tool_timeout = (seconds > 0).then_some(seconds);
        }

        // BITCHECK_IGNORE (comma separated warning kinds)
        if let Ok(ignore) = std::env::var("BITCHECK_IGNORE") {
            self.check.ignore = parse_kinds(&ignore)?;
        }

        // BITCHECK_LIBRARY
        if let Ok(library) = std::env::var("BITCHECK_LIBRARY") {
            if library.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "BITCHECK_LIBRARY".to_string(),
                    value: library,
                }
                .into());
            }
            self.paths.library_path = Some(PathBuf::from(library));
        }

        Ok(())
    }

    /// Get the library database path (with default)
    #[must_use]
    pub fn library_path(&self) -> PathBuf {
        self.paths.library_path.clone().unwrap_or_else(|| {
            data_dir()
                .join(fixed_paths::APP_DIR)
                .join(fixed_paths::LIBRARY_FILE)
        })
    }

    /// Get the directory debug logs are written to (with default)
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.paths.log_dir.clone().unwrap_or_else(|| {
            data_dir()
                .join(fixed_paths::APP_DIR)
                .join(fixed_paths::LOGS_DIR)
        })
    }

    /// Number of files verified concurrently
    #[must_use]
    pub fn jobs(&self) -> usize {
        calculate_jobs(self.check.jobs)
    }

    /// Validator timeout, if one is configured; 0 means no limit
    #[must_use]
    pub fn tool_timeout(&self) -> Option<Duration> {
        self.check
            .tool_timeout
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

/// Calculate verification jobs based on CPU count
#[must_use]
pub fn calculate_jobs(config_value: usize) -> usize {
    if config_value > 0 {
        config_value // User override
    } else {
        num_cpus::get().max(1)
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn parse_bool(field: &str, value: String) -> Result<bool, Error> {
    match value.as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}

fn parse_kinds(value: &str) -> Result<Vec<WarningKind>, Error> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            WarningKind::parse(name).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: "BITCHECK_IGNORE".to_string(),
                    value: name.to_string(),
                }
                .into()
            })
        })
        .collect()
}
