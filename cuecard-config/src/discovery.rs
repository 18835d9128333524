//! Configuration file discovery
//!
//! Cuecard keeps a single configuration file in `~/.config/cuecard/`, named
//! `config` with any of the supported extensions.

use std::path::{Path, PathBuf};
use tracing::trace;

/// Base name of the configuration file
pub const CONFIG_FILE_STEM: &str = "config";

/// Extensions probed in order when looking for the configuration file
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "toml", "json"];

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path, defaulting to YAML
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(Self::Yaml)
    }
}

/// The first existing configuration file in `dir`, in [`CONFIG_EXTENSIONS`] order
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        .inspect(|candidate| trace!("Checking for config file {}", candidate.display()))
        .find(|candidate| candidate.is_file())
}

/// Where a new configuration file is written when none exists yet
pub fn default_config_file(dir: &Path) -> PathBuf {
    dir.join(format!("{CONFIG_FILE_STEM}.{}", CONFIG_EXTENSIONS[0]))
}
