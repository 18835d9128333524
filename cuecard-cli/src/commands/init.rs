//! Init command implementation

use crate::exit_codes::EXIT_SUCCESS;
use anyhow::{bail, Context, Result};
use cuecard_config::{expand_home, ConfigProvider, CuecardConfig};
use cuecard_prompts::{create_prompt_file, sample_prompt};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for `cuecard init`
#[derive(Debug, Default, Clone)]
pub struct InitArgs {
    pub prompts_dir: Option<PathBuf>,
    pub editor: Option<String>,
    pub sample: bool,
    pub force: bool,
}

/// Write the configuration file and create the prompts directory.
///
/// An existing configuration is left alone unless `force` is set.
pub fn handle_command(args: InitArgs, provider: &ConfigProvider, quiet: bool) -> Result<i32> {
    let Some(prompts_dir) = args.prompts_dir else {
        bail!("init needs --prompts-dir <DIR>");
    };

    if provider.exists()? && !args.force {
        bail!(
            "configuration already exists at {}; pass --force to overwrite",
            provider.config_path()?.display()
        );
    }

    let mut config = CuecardConfig::with_prompts_dir(expand_home(&prompts_dir)?);
    if let Some(editor) = args.editor {
        config.editor = editor;
    }

    fs::create_dir_all(&config.prompts_dir).with_context(|| {
        format!(
            "failed to create prompts directory {}",
            config.prompts_dir.display()
        )
    })?;
    let config_path = provider.save(&config)?;

    if !quiet {
        println!("Wrote {}", config_path.display());
        println!("Prompts directory: {}", config.prompts_dir.display());
    }

    if args.sample {
        let path = write_sample(&config.prompts_dir)?;
        if !quiet {
            println!("Created sample prompt {}", path.display());
        }
    }

    Ok(EXIT_SUCCESS)
}

fn write_sample(prompts_dir: &Path) -> Result<PathBuf> {
    Ok(create_prompt_file(prompts_dir, &sample_prompt())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuecard_prompts::load_directory;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config_and_sample() {
        let temp = TempDir::new().unwrap();
        let provider = ConfigProvider::with_config_dir(temp.path().join("config"));
        let prompts_dir = temp.path().join("prompts");

        let args = InitArgs {
            prompts_dir: Some(prompts_dir.clone()),
            editor: Some("nvim".to_string()),
            sample: true,
            force: false,
        };
        assert_eq!(handle_command(args, &provider, true).unwrap(), EXIT_SUCCESS);

        let config = provider.load().unwrap();
        assert_eq!(config.prompts_dir, prompts_dir);
        assert_eq!(config.editor, "nvim");

        let prompts = load_directory(&prompts_dir).unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].title, "Hello World");
        assert_eq!(prompts[0].group, "Examples");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let provider = ConfigProvider::with_config_dir(temp.path().join("config"));
        let args = InitArgs {
            prompts_dir: Some(temp.path().join("prompts")),
            ..InitArgs::default()
        };

        handle_command(args.clone(), &provider, true).unwrap();
        let error = handle_command(args.clone(), &provider, true).unwrap_err();
        assert!(error.to_string().contains("--force"));

        let forced = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(handle_command(forced, &provider, true).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_init_requires_prompts_dir() {
        let temp = TempDir::new().unwrap();
        let provider = ConfigProvider::with_config_dir(temp.path());
        let error = handle_command(InitArgs::default(), &provider, true).unwrap_err();
        assert!(error.to_string().contains("--prompts-dir"));
    }
}
