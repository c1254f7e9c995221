//! Decoration sizes used to compute frame margins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame border in pixels (valid range: 0-20).
    pub border_width: u32,
    /// Titlebar height in pixels (valid range: 0-64).
    pub title_height: u32,
    /// Resize handle height in pixels (valid range: 0-32).
    pub handle_height: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            border_width: 1,
            title_height: 18,
            handle_height: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_config_defaults() {
        let config = FrameConfig::default();
        assert_eq!(config.border_width, 1);
        assert_eq!(config.title_height, 18);
        assert_eq!(config.handle_height, 6);
    }

    #[test]
    fn frame_config_partial_toml() {
        let config: FrameConfig = toml::from_str("title_height = 24").unwrap();
        assert_eq!(config.title_height, 24);
        assert_eq!(config.border_width, 1);
    }
}
