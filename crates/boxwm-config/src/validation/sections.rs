use crate::schema::BoxConfig;

use super::helpers::validate_range;

pub(crate) fn validate_screen(errors: &mut Vec<String>, config: &BoxConfig) {
    let screen = &config.screen;
    validate_range(errors, "screen.workspaces", screen.workspaces, 1, 32);
    validate_range(errors, "screen.border_width", screen.border_width, 0, 20);
    validate_range(
        errors,
        "screen.edge_snap_threshold",
        screen.edge_snap_threshold,
        0,
        100,
    );
    if screen.workspace_names.len() > 32 {
        errors.push(format!(
            "screen.workspace_names has {} entries, at most 32 allowed",
            screen.workspace_names.len()
        ));
    }
}

pub(crate) fn validate_frame(errors: &mut Vec<String>, config: &BoxConfig) {
    let frame = &config.frame;
    validate_range(errors, "frame.border_width", frame.border_width, 0, 20);
    validate_range(errors, "frame.title_height", frame.title_height, 0, 64);
    validate_range(errors, "frame.handle_height", frame.handle_height, 0, 32);
}

pub(crate) fn validate_timing(errors: &mut Vec<String>, config: &BoxConfig) {
    let timing = &config.timing;
    validate_range(
        errors,
        "timing.auto_raise_delay_ms",
        timing.auto_raise_delay_ms,
        0,
        10_000,
    );
    validate_range(
        errors,
        "timing.reconfigure_delay_ms",
        timing.reconfigure_delay_ms,
        0,
        5_000,
    );
    validate_range(
        errors,
        "timing.double_click_interval_ms",
        timing.double_click_interval_ms,
        50,
        2_000,
    );
}
