//! Full configuration validation.
//!
//! Each section has its own check; every violation is collected into a
//! single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::BoxConfig;
use boxwm_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BoxConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_screen(&mut errors, config);
    sections::validate_frame(&mut errors, config);
    sections::validate_timing(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
