//! Configuration loading and management
//!
//! Handles parsing of `.hashlist.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".hashlist.toml";

const MAX_ROW_HEIGHT: u16 = 4;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Terminal view settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Terminal view configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Terminal rows per task
    #[serde(default = "default_row_height")]
    pub row_height: u16,

    /// Tint the hovered row and reveal its remove button
    #[serde(default = "default_true")]
    pub hover_highlight: bool,

    /// Show the progress bar when the list is not empty
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_row_height() -> u16 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            hover_highlight: true,
            show_progress: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Page the fragment belongs to; when set, full URLs are printed
    #[serde(default)]
    pub base_url: Option<String>,
}

impl OutputConfig {
    /// Parsed base URL, with any existing fragment removed.
    pub fn base_url(&self) -> Result<Option<Url>> {
        let Some(raw) = self.base_url.as_deref() else {
            return Ok(None);
        };
        let mut url = Url::parse(raw).map_err(|err| {
            Error::InvalidConfig(format!("output.base_url: invalid URL '{raw}': {err}"))
        })?;
        url.set_fragment(None);
        Ok(Some(url))
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.hashlist.toml` from `dir`, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Resolve configuration for a run.
    ///
    /// An explicit path must load cleanly. Otherwise the working directory
    /// is tried, then the user config directory, then defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        if cwd.join(CONFIG_FILE_NAME).exists() {
            return Ok(Self::load_from_dir(&cwd));
        }

        if let Some(path) = user_config_path() {
            if path.exists() {
                return Ok(Self::load(&path).unwrap_or_else(|err| {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                    Self::default()
                }));
            }
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        self.ui.validate()?;
        self.output.base_url()?;
        Ok(())
    }
}

impl UiConfig {
    fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(Error::InvalidConfig(
                "ui.row_height must be >= 1".to_string(),
            ));
        }
        if self.row_height > MAX_ROW_HEIGHT {
            return Err(Error::InvalidConfig(format!(
                "ui.row_height must be <= {MAX_ROW_HEIGHT}"
            )));
        }
        Ok(())
    }
}

/// `config.toml` in the platform's per-user config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "hashlist")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
