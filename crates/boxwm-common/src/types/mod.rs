mod core;
mod rect;

pub use self::core::*;
pub use rect::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_are_inclusive() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.left(), 10);
        assert_eq!(r.top(), 20);
        assert_eq!(r.right(), 109);
        assert_eq!(r.bottom(), 69);
        assert_eq!(Rect::from_edges(10, 20, 109, 69), r);
    }

    #[test]
    fn rect_set_edges() {
        let mut r = Rect::new(0, 0, 10, 10);
        r.set_right(49);
        r.set_bottom(19);
        assert_eq!(r, Rect::new(0, 0, 50, 20));
    }

    #[test]
    fn rect_validity() {
        assert!(Rect::new(0, 0, 1, 1).is_valid());
        assert!(!Rect::new(0, 0, 0, 10).is_valid());
        assert!(!Rect::new(0, 0, 10, -1).is_valid());
        assert!(!Rect::default().is_valid());
    }

    #[test]
    fn rect_contains_point() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(9, 9));
        assert!(!r.contains_point(10, 5));
        assert!(!r.contains_point(-1, 5));
    }

    #[test]
    fn rect_contains_rect() {
        let outer = Rect::new(0, 0, 800, 600);
        assert!(outer.contains(&Rect::new(100, 100, 200, 200)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect::new(700, 0, 200, 10)));
    }

    #[test]
    fn rect_intersects_and_intersection() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection(&b), Rect::new(50, 50, 50, 50));

        let c = Rect::new(100, 0, 10, 10);
        assert!(!a.intersects(&c));
        assert!(!a.intersection(&c).is_valid());
    }

    #[test]
    fn rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 400, 600);
        let b = Rect::new(400, 0, 400, 600);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn subtract_disjoint_returns_self() {
        let area = Rect::new(0, 0, 800, 600);
        let obstacle = Rect::new(900, 0, 10, 10);
        assert_eq!(area.subtract(&obstacle), vec![area]);
    }

    #[test]
    fn subtract_left_half_leaves_right_sliver() {
        let area = Rect::new(0, 0, 800, 600);
        let obstacle = Rect::new(0, 0, 400, 600);
        assert_eq!(area.subtract(&obstacle), vec![Rect::new(400, 0, 400, 600)]);
    }

    #[test]
    fn subtract_center_leaves_four_slivers() {
        let area = Rect::new(0, 0, 100, 100);
        let obstacle = Rect::new(40, 40, 20, 20);
        let parts = area.subtract(&obstacle);
        assert_eq!(
            parts,
            vec![
                Rect::new(0, 0, 40, 100),
                Rect::new(0, 0, 100, 40),
                Rect::new(60, 0, 40, 100),
                Rect::new(0, 60, 100, 40),
            ]
        );
        for part in &parts {
            assert!(!part.intersects(&obstacle));
            assert!(area.contains(part));
        }
    }

    #[test]
    fn subtract_covering_obstacle_leaves_nothing() {
        let area = Rect::new(10, 10, 50, 50);
        let obstacle = Rect::new(0, 0, 100, 100);
        assert!(area.subtract(&obstacle).is_empty());
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(-5, 7, 640, 480);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn window_handle_display() {
        assert_eq!(WindowHandle(0x1a00003).to_string(), "0x1a00003");
        assert_eq!(WindowHandle::NONE.to_string(), "0x0");
        assert!(WindowHandle::NONE.is_none());
        assert!(!WindowHandle(1).is_none());
    }

    #[test]
    fn window_handle_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(WindowHandle(1));
        set.insert(WindowHandle(2));
        set.insert(WindowHandle(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn map_state_serialization() {
        let json = serde_json::to_string(&MapState::Viewable).unwrap();
        assert_eq!(json, "\"viewable\"");
        let back: MapState = serde_json::from_str("\"unmapped\"").unwrap();
        assert_eq!(back, MapState::Unmapped);
    }
}
