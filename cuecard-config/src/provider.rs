//! Configuration provider using Figment for Cuecard

use crate::discovery::{default_config_file, find_config_file, ConfigFormat};
use crate::{ConfigError, ConfigResult, CuecardConfig};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "CUECARD_";

/// Separator for nested keys in environment variables (`CUECARD_WINDOW__WIDTH`)
pub const ENV_NESTED_SEPARATOR: &str = "__";

/// Configuration provider using figment
///
/// Sources, later ones overriding earlier ones:
/// 1. Built-in defaults
/// 2. The configuration file
/// 3. `CUECARD_*` environment variables
///
/// Nothing is cached; every load reads the file again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    config_dir: Option<PathBuf>,
}

impl ConfigProvider {
    /// Create a provider using `~/.config/cuecard`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider rooted at a specific configuration directory
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(dir.into()),
        }
    }

    /// The configuration directory
    pub fn config_dir(&self) -> ConfigResult<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".config").join("cuecard"))
                .ok_or(ConfigError::HomeDirectoryNotFound),
        }
    }

    /// The configuration file: the first one found, or where a new one goes
    pub fn config_path(&self) -> ConfigResult<PathBuf> {
        let dir = self.config_dir()?;
        Ok(find_config_file(&dir).unwrap_or_else(|| default_config_file(&dir)))
    }

    /// Whether a configuration file exists
    pub fn exists(&self) -> ConfigResult<bool> {
        Ok(find_config_file(&self.config_dir()?).is_some())
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<CuecardConfig> {
        let dir = self.config_dir()?;
        let path = find_config_file(&dir).ok_or_else(|| ConfigError::FileNotFound {
            path: default_config_file(&dir),
        })?;
        self.load_from_path(path)
    }

    /// Load and validate the configuration from a specific file
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> ConfigResult<CuecardConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!("Loading configuration from {}", path.display());
        let mut config: CuecardConfig = self.build_figment(path).extract()?;
        config.validate()?;

        trace!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Write `config` to [`config_path`](Self::config_path). Returns the path written.
    pub fn save(&self, config: &CuecardConfig) -> ConfigResult<PathBuf> {
        let path = self.config_path()?;
        config.save_to_path(&path)?;
        Ok(path)
    }

    /// Build the figment with all sources in precedence order
    fn build_figment(&self, path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(CuecardConfig::default()));

        let figment = match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => figment.merge(Toml::file(path)),
            ConfigFormat::Yaml => figment.merge(Yaml::file(path)),
            ConfigFormat::Json => figment.merge(Json::file(path)),
        };

        figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
    }
}
