//! Integration tests for configuration layering and file formats

use cuecard_config::{ConfigError, ConfigProvider, CuecardConfig, Theme, WindowPosition};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(pairs: &[(&'static str, &str)]) -> Self {
        for (key, value) in pairs {
            std::env::set_var(key, value);
        }
        Self {
            keys: pairs.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn json_config_with_partial_window() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.json"),
        r#"{ "prompts_dir": "/json/prompts", "window": { "height": 500 } }"#,
    )
    .unwrap();

    let config = ConfigProvider::with_config_dir(temp.path()).load().unwrap();
    assert_eq!(config.prompts_dir, PathBuf::from("/json/prompts"));
    assert_eq!(config.window.width, 1024);
    assert_eq!(config.window.height, 500);
}

#[test]
#[serial]
fn yaml_wins_over_other_formats() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "prompts_dir: /yaml\n").unwrap();
    fs::write(temp.path().join("config.toml"), "prompts_dir = \"/toml\"\n").unwrap();

    let config = ConfigProvider::with_config_dir(temp.path()).load().unwrap();
    assert_eq!(config.prompts_dir, PathBuf::from("/yaml"));
}

#[test]
#[serial]
fn environment_supplies_required_field() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "theme: light\n").unwrap();

    let _env = EnvGuard::set(&[
        ("CUECARD_PROMPTS_DIR", "/env/prompts"),
        ("CUECARD_WINDOW__POSITION", "remember"),
    ]);

    let config = ConfigProvider::with_config_dir(temp.path()).load().unwrap();
    assert_eq!(config.prompts_dir, PathBuf::from("/env/prompts"));
    assert_eq!(config.theme, Theme::Light);
    assert_eq!(config.window.position, WindowPosition::Remember);
}

#[test]
#[serial]
fn environment_alone_is_not_enough_without_a_file() {
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[("CUECARD_PROMPTS_DIR", "/env/prompts")]);

    let result = ConfigProvider::with_config_dir(temp.path()).load();
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
#[serial]
fn load_from_explicit_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    fs::write(&path, "prompts_dir = \"/custom\"\nwatch_debounce_ms = 50\n").unwrap();

    let config = ConfigProvider::new().load_from_path(&path).unwrap();
    assert_eq!(config.prompts_dir, PathBuf::from("/custom"));
    assert_eq!(config.watch_debounce_ms, 50);
}

#[test]
#[serial]
fn saved_toml_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    let mut config = CuecardConfig::with_prompts_dir("/round/trip");
    config.editor = "zed".to_string();
    config.window.width = 1440;
    config.save_to_path(&path).unwrap();

    let loaded = ConfigProvider::with_config_dir(temp.path()).load().unwrap();
    assert_eq!(loaded, config);
}
