//! Per-screen policy: workspaces, placement and focus model.

use serde::{Deserialize, Serialize};

/// How new windows without a requested position are placed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementPolicy {
    #[default]
    RowSmart,
    ColSmart,
    Cascade,
}

/// Horizontal scan direction for smart placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RowDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Vertical scan direction for smart placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColDirection {
    #[default]
    TopToBottom,
    BottomToTop,
}

/// Focus follows the pointer (sloppy) or follows clicks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FocusModel {
    #[default]
    Sloppy,
    Click,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Number of workspaces created at startup (valid range: 1-32).
    pub workspaces: u32,
    /// Display names; workspaces past the end of this list get "Workspace N".
    pub workspace_names: Vec<String>,
    pub placement: PlacementPolicy,
    pub row_direction: RowDirection,
    pub col_direction: ColDirection,
    pub focus_model: FocusModel,
    /// Raise a window after the pointer dwells on it (sloppy focus only).
    pub auto_raise: bool,
    /// Raise a window when it is clicked (sloppy focus only).
    pub click_raise: bool,
    /// Give focus to newly mapped windows.
    pub focus_new: bool,
    /// Restore the last focused window when switching workspaces.
    pub focus_last: bool,
    /// Maximize against the full screen instead of the usable area.
    pub full_max: bool,
    /// Padding kept around windows by smart placement (valid range: 0-20).
    pub border_width: u32,
    /// Snap distance when moving windows near edges (valid range: 0-100).
    pub edge_snap_threshold: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            workspaces: 1,
            workspace_names: Vec::new(),
            placement: PlacementPolicy::RowSmart,
            row_direction: RowDirection::LeftToRight,
            col_direction: ColDirection::TopToBottom,
            focus_model: FocusModel::Sloppy,
            auto_raise: false,
            click_raise: false,
            focus_new: true,
            focus_last: false,
            full_max: false,
            border_width: 1,
            edge_snap_threshold: 0,
        }
    }
}

impl ScreenConfig {
    /// Display name for workspace `id`.
    pub fn workspace_name(&self, id: u32) -> String {
        self.workspace_names
            .get(id as usize)
            .cloned()
            .unwrap_or_else(|| format!("Workspace {}", id + 1))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_config_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.workspaces, 1);
        assert_eq!(config.placement, PlacementPolicy::RowSmart);
        assert_eq!(config.row_direction, RowDirection::LeftToRight);
        assert_eq!(config.col_direction, ColDirection::TopToBottom);
        assert_eq!(config.focus_model, FocusModel::Sloppy);
        assert!(config.focus_new);
        assert!(!config.focus_last);
        assert!(!config.auto_raise);
    }

    #[test]
    fn screen_config_partial_toml() {
        let toml_str = r#"
workspaces = 3
placement = "col-smart"
row_direction = "right-to-left"
workspace_names = ["mail", "code"]
"#;
        let config: ScreenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workspaces, 3);
        assert_eq!(config.placement, PlacementPolicy::ColSmart);
        assert_eq!(config.row_direction, RowDirection::RightToLeft);
        // Defaults preserved
        assert_eq!(config.col_direction, ColDirection::TopToBottom);
        assert!(config.focus_new);
    }

    #[test]
    fn workspace_name_falls_back_to_number() {
        let config = ScreenConfig {
            workspace_names: vec!["mail".into()],
            ..Default::default()
        };
        assert_eq!(config.workspace_name(0), "mail");
        assert_eq!(config.workspace_name(1), "Workspace 2");
    }

    #[test]
    fn unknown_placement_is_rejected() {
        let result: Result<ScreenConfig, _> = toml::from_str(r#"placement = "tiled""#);
        assert!(result.is_err());
    }
}
