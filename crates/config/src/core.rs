//! Configuration sections shared across crates

use bitcheck_types::{ColorChoice, OutputFormat, WarningKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

/// Verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Run structural validators alongside checksum verification
    #[serde(default = "default_integrity")]
    pub integrity: bool,
    #[serde(default)]
    pub jobs: usize, // 0 = auto-detect
    /// Warning kinds that are neither reported nor counted as failures
    #[serde(default)]
    pub ignore: Vec<WarningKind>,
    /// Seconds a validator may run before it is killed; unset or 0 = no limit
    #[serde(default)]
    pub tool_timeout: Option<u64>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            integrity: true,
            jobs: 0,
            ignore: Vec::new(),
            tool_timeout: None,
        }
    }
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub library_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_integrity() -> bool {
    true
}
