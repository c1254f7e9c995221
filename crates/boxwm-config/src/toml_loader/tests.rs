//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{FocusModel, PlacementPolicy};
use boxwm_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_boxwm_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[screen]
workspaces = 4
placement = "cascade"

[frame]
title_height = 22
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.screen.workspaces, 4);
    assert_eq!(config.screen.placement, PlacementPolicy::Cascade);
    assert_eq!(config.frame.title_height, 22);
    // Defaults preserved
    assert_eq!(config.screen.focus_model, FocusModel::Sloppy);
    assert_eq!(config.frame.handle_height, 6);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_keeps_parsed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[screen]\nworkspaces = 99\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.screen.workspaces, 99);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boxwm").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.screen.workspaces, 1);
    assert_eq!(config.timing.auto_raise_delay_ms, 400);
}

#[test]
fn default_template_is_valid_toml() {
    let content = template::default_config_toml();
    let parsed: Result<crate::schema::BoxConfig, _> = toml::from_str(&content);
    assert!(parsed.is_ok());
}

#[test]
fn default_config_path_ends_with_boxwm() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("boxwm/config.toml"));
    }
}
