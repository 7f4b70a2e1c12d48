use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::subtitle_processor::SubtitleFormat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Format conversion settings
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Translation reply settings
    #[serde(default)]
    pub translation: TranslationConfig,
}

/// Format conversion settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Format written when `convert` is given no `--to`
    #[serde(default = "default_target_format")]
    pub default_target: SubtitleFormat,

    /// Replace existing output files instead of skipping them
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            default_target: default_target_format(),
            overwrite: false,
        }
    }
}

/// Settings for applying model translation replies
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Parse replies without the repair passes
    #[serde(default)]
    pub strict_json: bool,

    /// Inserted before the extension of translated files: `movie.<suffix>.srt`
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Keep the original line above each translation
    #[serde(default)]
    pub bilingual: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            strict_json: false,
            output_suffix: default_output_suffix(),
            bilingual: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_format() -> SubtitleFormat {
    SubtitleFormat::Srt
}

fn default_output_suffix() -> String {
    "translated".to_string()
}

impl Config {
    /// Load a configuration file; missing sections fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let suffix = self.translation.output_suffix.trim();
        if suffix.is_empty() {
            return Err(anyhow!("Translation output suffix must not be empty"));
        }
        if suffix.contains(['/', '\\']) {
            return Err(anyhow!(
                "Translation output suffix must not contain path separators: {}",
                suffix
            ));
        }

        Ok(())
    }
}
