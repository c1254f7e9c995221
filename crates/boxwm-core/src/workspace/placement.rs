//! Placement of new windows: smart (first free fit) and cascade.

use std::cmp::Ordering;

use boxwm_common::Rect;
use boxwm_config::schema::{ColDirection, PlacementPolicy, RowDirection};

use crate::geometry::free_space;

/// Offset between successive cascaded windows.
pub const CASCADE_STEP: i32 = 32;

/// Order free rectangles so the preferred one comes first.
///
/// Row placement scans rows first (vertical key, then horizontal);
/// column placement scans columns first. Each axis runs in the configured
/// direction, keyed on the edge the scan starts from.
fn compare(
    a: &Rect,
    b: &Rect,
    policy: PlacementPolicy,
    row: RowDirection,
    col: ColDirection,
) -> Ordering {
    let horizontal = match row {
        RowDirection::LeftToRight => a.left().cmp(&b.left()),
        RowDirection::RightToLeft => b.right().cmp(&a.right()),
    };
    let vertical = match col {
        ColDirection::TopToBottom => a.top().cmp(&b.top()),
        ColDirection::BottomToTop => b.bottom().cmp(&a.bottom()),
    };
    match policy {
        PlacementPolicy::ColSmart => horizontal.then(vertical),
        _ => vertical.then(horizontal),
    }
}

/// Smart placement of a frame of `size` inside `area`, avoiding
/// `obstacles` padded by `padding` on every side.
///
/// Returns `None` for the cascade policy or when no free rectangle is
/// large enough.
pub fn smart_place(
    area: Rect,
    obstacles: &[Rect],
    size: (i32, i32),
    policy: PlacementPolicy,
    row: RowDirection,
    col: ColDirection,
    padding: i32,
) -> Option<(i32, i32)> {
    if policy == PlacementPolicy::Cascade {
        return None;
    }

    let padded: Vec<Rect> = obstacles
        .iter()
        .map(|o| {
            Rect::new(
                o.x - padding,
                o.y - padding,
                o.width + padding * 2,
                o.height + padding * 2,
            )
        })
        .collect();

    let mut spaces = free_space(area, &padded);
    spaces.sort_by(|a, b| compare(a, b, policy, row, col));

    let (width, height) = size;
    let space = spaces
        .iter()
        .find(|s| s.width >= width && s.height >= height)?;

    let x = match row {
        RowDirection::LeftToRight => space.left(),
        RowDirection::RightToLeft => space.right() - width + 1,
    };
    let y = match col {
        ColDirection::TopToBottom => space.top(),
        ColDirection::BottomToTop => space.bottom() - height + 1,
    };
    Some((x, y))
}

/// Next cascade position, advancing the workspace's cascade offset.
/// The offset wraps back to the corner once it passes half the area.
pub fn cascade_place(area: Rect, cascade: &mut (i32, i32)) -> (i32, i32) {
    if cascade.0 > area.width / 2 || cascade.1 > area.height / 2 {
        *cascade = (CASCADE_STEP, CASCADE_STEP);
    }
    let position = (area.x + cascade.0, area.y + cascade.1);
    cascade.0 += CASCADE_STEP;
    cascade.1 += CASCADE_STEP;
    position
}

/// Keep a frame's right and bottom edges inside `area`, wrapping to the
/// area's origin on an axis that overflows.
pub fn clamp_to_area(position: (i32, i32), size: (i32, i32), area: Rect) -> (i32, i32) {
    let frame = Rect::new(position.0, position.1, size.0, size.1);
    let x = if frame.right() > area.right() {
        area.left()
    } else {
        position.0
    };
    let y = if frame.bottom() > area.bottom() {
        area.top()
    } else {
        position.1
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect::new(0, 0, 800, 600);

    fn place(obstacles: &[Rect], size: (i32, i32), policy: PlacementPolicy) -> Option<(i32, i32)> {
        smart_place(
            AREA,
            obstacles,
            size,
            policy,
            RowDirection::LeftToRight,
            ColDirection::TopToBottom,
            0,
        )
    }

    #[test]
    fn row_smart_fills_beside_existing_window() {
        let existing = [Rect::new(0, 0, 400, 600)];
        assert_eq!(
            place(&existing, (300, 300), PlacementPolicy::RowSmart),
            Some((400, 0))
        );
    }

    #[test]
    fn empty_area_places_at_scan_origin() {
        assert_eq!(place(&[], (300, 300), PlacementPolicy::RowSmart), Some((0, 0)));
        let pos = smart_place(
            AREA,
            &[],
            (300, 200),
            PlacementPolicy::RowSmart,
            RowDirection::RightToLeft,
            ColDirection::BottomToTop,
            0,
        );
        assert_eq!(pos, Some((500, 400)));
    }

    #[test]
    fn row_and_column_scans_differ() {
        // Top-left corner occupied: row scan stays on the top row, column
        // scan stays in the left column.
        let existing = [Rect::new(0, 0, 200, 200)];
        assert_eq!(
            place(&existing, (100, 100), PlacementPolicy::RowSmart),
            Some((200, 0))
        );
        assert_eq!(
            place(&existing, (100, 100), PlacementPolicy::ColSmart),
            Some((0, 200))
        );
    }

    #[test]
    fn padding_keeps_a_gap() {
        let existing = [Rect::new(0, 0, 400, 600)];
        let pos = smart_place(
            AREA,
            &existing,
            (300, 300),
            PlacementPolicy::RowSmart,
            RowDirection::LeftToRight,
            ColDirection::TopToBottom,
            4,
        );
        assert_eq!(pos, Some((404, 0)));
    }

    #[test]
    fn no_fit_and_cascade_return_none() {
        let existing = [Rect::new(0, 0, 600, 600)];
        assert_eq!(place(&existing, (300, 300), PlacementPolicy::RowSmart), None);
        assert_eq!(place(&[], (10, 10), PlacementPolicy::Cascade), None);
    }

    #[test]
    fn cascade_advances_and_wraps() {
        let area = Rect::new(10, 20, 200, 200);
        let mut cascade = (CASCADE_STEP, CASCADE_STEP);
        assert_eq!(cascade_place(area, &mut cascade), (42, 52));
        assert_eq!(cascade_place(area, &mut cascade), (74, 84));
        assert_eq!(cascade_place(area, &mut cascade), (106, 116));
        // 128 > 100: back to the corner.
        assert_eq!(cascade_place(area, &mut cascade), (42, 52));
    }

    #[test]
    fn clamp_wraps_overflowing_axis_only() {
        assert_eq!(clamp_to_area((700, 100), (200, 100), AREA), (0, 100));
        assert_eq!(clamp_to_area((100, 550), (200, 100), AREA), (100, 0));
        assert_eq!(clamp_to_area((600, 500), (200, 100), AREA), (600, 500));
    }
}
