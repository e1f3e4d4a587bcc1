use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wikitext_core::{ShareStyle, YearPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How share paths are written, see [`wikitext_core::normalize_share_path`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStyleSetting {
    #[default]
    Native,
    Windows,
    Posix,
}

impl From<ShareStyleSetting> for ShareStyle {
    fn from(setting: ShareStyleSetting) -> Self {
        match setting {
            ShareStyleSetting::Native => ShareStyle::Native,
            ShareStyleSetting::Windows => ShareStyle::Windows,
            ShareStyleSetting::Posix => ShareStyle::Posix,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Months behind the current month after which a date without a year
    /// is read as next year.
    pub rollover_months: u32,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            rollover_months: YearPolicy::default().rollover_months,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub share_style: ShareStyleSetting,
    pub journal: JournalConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/wikitext");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn year_policy(&self) -> YearPolicy {
        YearPolicy {
            rollover_months: self.journal.rollover_months,
        }
    }

    pub fn share_style(&self) -> ShareStyle {
        self.share_style.into()
    }
}
