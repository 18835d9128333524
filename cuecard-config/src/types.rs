//! Core data structures for Cuecard configuration

use crate::discovery::ConfigFormat;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Color theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always light
    Light,
    /// Always dark
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

/// Where the main window opens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPosition {
    /// Reopen where it was last closed
    Remember,
    /// Center on screen
    #[default]
    Center,
}

/// Main window geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub position: WindowPosition,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            position: WindowPosition::Center,
        }
    }
}

/// Application configuration
///
/// ```yaml
/// prompts_dir: ~/prompts
/// editor: code
/// theme: system
/// watch_debounce_ms: 100
/// window:
///   width: 1024
///   height: 768
///   position: center
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuecardConfig {
    /// Directory holding the prompt files. Required.
    pub prompts_dir: PathBuf,
    /// Command used to open prompts for editing
    pub editor: String,
    pub theme: Theme,
    /// Quiet period before the directory watcher reloads
    pub watch_debounce_ms: u64,
    pub window: WindowConfig,
}

impl Default for CuecardConfig {
    fn default() -> Self {
        Self {
            prompts_dir: PathBuf::new(),
            editor: "code".to_string(),
            theme: Theme::default(),
            watch_debounce_ms: 100,
            window: WindowConfig::default(),
        }
    }
}

impl CuecardConfig {
    /// Default configuration pointing at `prompts_dir`
    pub fn with_prompts_dir(prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
            ..Self::default()
        }
    }

    /// The watcher debounce as a [`Duration`]
    pub fn watch_debounce(&self) -> Duration {
        Duration::from_millis(self.watch_debounce_ms)
    }

    /// Check required fields and expand a leading `~` in `prompts_dir`
    pub fn validate(&mut self) -> ConfigResult<()> {
        if self.prompts_dir.as_os_str().is_empty() {
            return Err(ConfigError::validation("prompts_dir is required"));
        }

        self.prompts_dir = expand_home(&self.prompts_dir)?;
        Ok(())
    }

    /// Save to the default configuration location
    pub fn save(&self) -> ConfigResult<PathBuf> {
        crate::ConfigProvider::new().save(self)
    }

    /// Save to `path`, creating parent directories.
    ///
    /// The format follows the extension: TOML for `.toml`, JSON for `.json`,
    /// YAML otherwise.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml_ng::to_string(self).map_err(ConfigError::serialize)?,
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(ConfigError::serialize)?,
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(ConfigError::serialize)?
            }
        };

        fs::write(path, contents).map_err(|source| ConfigError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }
}

/// Replace a leading `~` component with the user's home directory
pub fn expand_home(path: &Path) -> ConfigResult<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
