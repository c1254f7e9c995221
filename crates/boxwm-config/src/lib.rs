//! boxwm configuration system.
//!
//! TOML configuration with serde defaults for every section, so partial
//! files work out of the box, plus range validation that reports every
//! problem at once.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use boxwm_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BoxConfig, CONFIG_SCHEMA_VERSION};

use boxwm_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a documented default file when none exists, then validates
/// the result.
pub fn load_config() -> Result<BoxConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BoxConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
