//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> String {
    r##"# boxwm configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[screen]
# workspaces = 1                 # 1-32
# workspace_names = ["one", "two"]
# placement = "row-smart"        # row-smart | col-smart | cascade
# row_direction = "left-to-right"  # left-to-right | right-to-left
# col_direction = "top-to-bottom"  # top-to-bottom | bottom-to-top
# focus_model = "sloppy"         # sloppy | click
# auto_raise = false
# click_raise = false
# focus_new = true
# focus_last = false
# full_max = false
# border_width = 1               # 0-20
# edge_snap_threshold = 0        # 0-100

[frame]
# border_width = 1               # 0-20
# title_height = 18              # 0-64
# handle_height = 6              # 0-32

[timing]
# auto_raise_delay_ms = 400      # 0-10000
# reconfigure_delay_ms = 250     # 0-5000
# double_click_interval_ms = 250 # 50-2000

[logging]
# level = "info"                 # trace | debug | info | warn | error
"##
    .to_string()
}
