//! Cuecard Configuration Management using Figment
//!
//! Cuecard reads one configuration file from `~/.config/cuecard/`, named
//! `config.yaml`, `config.yml`, `config.toml` or `config.json` (first found).
//! Values are layered: built-in defaults, then the file, then `CUECARD_*`
//! environment variables.
//!
//! ```no_run
//! use cuecard_config::load_config;
//!
//! let config = load_config()?;
//! println!("Prompts live in {}", config.prompts_dir.display());
//! # Ok::<(), cuecard_config::ConfigError>(())
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export CUECARD_PROMPTS_DIR=~/prompts     # → prompts_dir
//! export CUECARD_EDITOR=nvim               # → editor
//! export CUECARD_WINDOW__WIDTH=1280        # → window.width
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::ConfigFormat;
pub use error::ConfigError;
pub use provider::ConfigProvider;
pub use types::{expand_home, CuecardConfig, Theme, WindowConfig, WindowPosition};

use std::path::PathBuf;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load the configuration from the default location
pub fn load_config() -> ConfigResult<CuecardConfig> {
    ConfigProvider::new().load()
}

/// The default configuration directory, `~/.config/cuecard`
pub fn config_dir() -> ConfigResult<PathBuf> {
    ConfigProvider::new().config_dir()
}

/// The configuration file path in the default directory
pub fn config_path() -> ConfigResult<PathBuf> {
    ConfigProvider::new().config_path()
}

/// Whether a configuration file exists in the default directory
pub fn exists() -> ConfigResult<bool> {
    ConfigProvider::new().exists()
}
