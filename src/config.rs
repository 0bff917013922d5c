//! Configuration loading for Leek.
//!
//! Loads `leek.toml` with per-section defaults. All sections use
//! `#[serde(default)]` so a minimal or empty config file is valid.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::diagnoser::DEFAULT_MAX_SEGMENT_SIZE;
use crate::localization::{self, DEFAULT_LOCALE};

/// File name of the configuration inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "leek.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeekConfig {
    /// Diagnoser output settings.
    #[serde(default)]
    pub diagnoser: DiagnoserConfig,

    /// Extra translation files.
    #[serde(default)]
    pub localization: LocalizationConfig,

    /// Log filter and optional log file directory.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Diagnoser output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnoserConfig {
    /// Locale the report is rendered in.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Maximum body length of one report segment, in characters.
    #[serde(default = "default_max_segment_size")]
    pub max_segment_size: usize,
}

impl Default for DiagnoserConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            max_segment_size: default_max_segment_size(),
        }
    }
}

/// Translation overlay settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizationConfig {
    /// Directory holding `<locale>.json` files layered over the built-in tables.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// If set, JSON logs are also written here with daily rotation.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LeekConfig {
    /// Validate that configuration values are within sane bounds.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.diagnoser.max_segment_size > 0,
            "diagnoser.max_segment_size must be > 0"
        );
        anyhow::ensure!(
            localization::is_supported(&self.diagnoser.locale),
            "diagnoser.locale '{}' is not a supported locale",
            self.diagnoser.locale
        );
        anyhow::ensure!(
            !self.logging.level.trim().is_empty(),
            "logging.level must not be empty"
        );
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub fn load_config(path: &Path) -> anyhow::Result<LeekConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let config: LeekConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load `~/.leek/leek.toml`, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or the file
/// exists but is invalid.
pub fn load_default_config() -> anyhow::Result<LeekConfig> {
    let path = config_dir()?.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(LeekConfig::default());
    }
    load_config(&path)
}

/// Resolve the default config directory (`~/.leek/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".leek"))
}

// Default value functions for serde.

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

fn default_max_segment_size() -> usize {
    DEFAULT_MAX_SEGMENT_SIZE
}

fn default_log_level() -> String {
    "info".to_owned()
}
