//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = BoxConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_workspaces() {
    let mut config = BoxConfig::default();
    config.screen.workspaces = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("screen.workspaces"));
}

#[test]
fn catches_too_many_workspaces() {
    let mut config = BoxConfig::default();
    config.screen.workspaces = 33;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("screen.workspaces = 33 is out of range [1, 32]"));
}

#[test]
fn catches_title_height_too_large() {
    let mut config = BoxConfig::default();
    config.frame.title_height = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("frame.title_height"));
}

#[test]
fn catches_double_click_too_short() {
    let mut config = BoxConfig::default();
    config.timing.double_click_interval_ms = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("timing.double_click_interval_ms"));
}

#[test]
fn catches_too_many_workspace_names() {
    let mut config = BoxConfig::default();
    config.screen.workspace_names = (0..40).map(|i| format!("ws{i}")).collect();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("screen.workspace_names"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BoxConfig::default();
    config.screen.workspaces = 0;
    config.frame.border_width = 50;
    config.timing.auto_raise_delay_ms = 60_000;
    let err = validate(&config).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("screen.workspaces"));
    assert!(msg.contains("frame.border_width"));
    assert!(msg.contains("timing.auto_raise_delay_ms"));
    assert_eq!(msg.matches("; ").count(), 2);
}
