//! Configuration schema types for boxwm.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod frame;
mod logging;
mod screen;
mod timing;

pub use frame::*;
pub use logging::*;
pub use screen::*;
pub use timing::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub screen: ScreenConfig,
    pub frame: FrameConfig,
    pub timing: TimingConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: BoxConfig = toml::from_str("").unwrap();
        assert_eq!(config.screen.workspaces, 1);
        assert_eq!(config.screen.placement, PlacementPolicy::RowSmart);
        assert_eq!(config.frame.border_width, 1);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn sections_parse_independently() {
        let toml_str = r#"
[screen]
workspaces = 4
focus_model = "click"

[timing]
auto_raise_delay_ms = 150
"#;
        let config: BoxConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.screen.workspaces, 4);
        assert_eq!(config.screen.focus_model, FocusModel::Click);
        assert_eq!(config.timing.auto_raise_delay_ms, 150);
        // Untouched sections keep defaults
        assert_eq!(config.timing.reconfigure_delay_ms, 250);
        assert_eq!(config.frame.title_height, 18);
    }
}
