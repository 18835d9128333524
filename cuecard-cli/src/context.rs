//! CLI Context
//!
//! Shared context object holding the resolved prompts directory and the
//! global output settings, so commands do not resolve them again.

use crate::cli::OutputFormat;
use anyhow::{anyhow, bail, Context, Result};
use cuecard_common::Pretty;
use cuecard_config::{ConfigError, ConfigProvider, CuecardConfig};
use cuecard_prompts::{find_prompt, load_directory, Prompt};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Shared CLI context
#[derive(Debug)]
pub struct CliContext {
    /// Directory holding the prompt files
    pub prompts_dir: PathBuf,

    /// Loaded configuration, when a configuration file exists
    pub config: Option<CuecardConfig>,

    /// Global output format setting
    pub format: OutputFormat,

    /// Enable verbose output
    pub verbose: bool,

    /// Suppress output except errors
    pub quiet: bool,
}

impl CliContext {
    /// Build the context from the global flags and the configuration file.
    ///
    /// `--prompts-dir` wins over the configured directory. Without either,
    /// the user is pointed at `cuecard init`.
    pub fn new(
        provider: &ConfigProvider,
        prompts_dir: Option<PathBuf>,
        format: Option<OutputFormat>,
        verbose: bool,
        quiet: bool,
    ) -> Result<Self> {
        let config = match provider.load() {
            Ok(config) => {
                tracing::debug!("Loaded configuration: {}", Pretty(&config));
                Some(config)
            }
            Err(ConfigError::FileNotFound { path }) => {
                tracing::debug!("No configuration file at {}", path.display());
                None
            }
            Err(e) if prompts_dir.is_some() => {
                tracing::warn!("Ignoring configuration: {}", e);
                None
            }
            Err(e) => return Err(e).context("failed to load configuration"),
        };

        let prompts_dir = match prompts_dir {
            Some(dir) => cuecard_config::expand_home(&dir)?,
            None => match &config {
                Some(config) => config.prompts_dir.clone(),
                None => bail!(
                    "no prompts directory configured; run `cuecard init --prompts-dir <DIR>` or pass --prompts-dir"
                ),
            },
        };

        Ok(Self {
            prompts_dir,
            config,
            format: format.unwrap_or_default(),
            verbose,
            quiet,
        })
    }

    /// Context for an explicit directory, without touching configuration
    pub fn for_dir(prompts_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
            config: None,
            format,
            verbose: false,
            quiet: false,
        }
    }

    /// Load every prompt in the prompts directory
    pub fn load_prompts(&self) -> Result<Vec<Prompt>> {
        load_directory(&self.prompts_dir).with_context(|| {
            format!(
                "failed to load prompts from {}",
                self.prompts_dir.display()
            )
        })
    }

    /// Load the library and take out the prompt matching `key`
    pub fn find(&self, key: &str) -> Result<Prompt> {
        let prompts = self.load_prompts()?;
        find_prompt(&prompts, key)
            .cloned()
            .ok_or_else(|| anyhow!("prompt not found: {key}"))
    }

    /// Debounce for the directory watcher, from configuration when present
    pub fn watch_debounce(&self) -> Duration {
        self.config
            .as_ref()
            .map(CuecardConfig::watch_debounce)
            .unwrap_or(cuecard_prompts::DEFAULT_DEBOUNCE)
    }

    /// Print a serializable value as JSON or YAML.
    ///
    /// Returns `false` for table output, leaving rendering to the caller.
    pub fn print_structured<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)
                    .context("failed to serialize to JSON")?;
                println!("{json}");
                Ok(true)
            }
            OutputFormat::Yaml => {
                let yaml =
                    serde_yaml_ng::to_string(value).context("failed to serialize to YAML")?;
                print!("{yaml}");
                Ok(true)
            }
            OutputFormat::Table => Ok(false),
        }
    }

    /// Print a status line unless `--quiet` was given
    pub fn status(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
