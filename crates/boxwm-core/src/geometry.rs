//! Frame margins, struts and free-space search over `Rect`.

use boxwm_common::Rect;
use serde::{Deserialize, Serialize};

/// Decoration insets between a frame and the client it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margin {
    pub const fn uniform(width: i32) -> Self {
        Self {
            left: width,
            top: width,
            right: width,
            bottom: width,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// The frame that exactly wraps `client`.
    pub fn frame_around(&self, client: Rect) -> Rect {
        Rect::new(
            client.x - self.left,
            client.y - self.top,
            client.width + self.horizontal(),
            client.height + self.vertical(),
        )
    }

    /// The client area inside `frame`.
    pub fn client_within(&self, frame: Rect) -> Rect {
        Rect::new(
            frame.x + self.left,
            frame.y + self.top,
            frame.width - self.horizontal(),
            frame.height - self.vertical(),
        )
    }
}

/// Screen-edge reservation contributed by a panel-like surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Strut {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// Full screen minus the largest reservation on each edge.
///
/// Struts on the same edge do not add up: two panels asking for 20 and 30
/// pixels at the top reserve 30.
pub fn usable_area<'a>(screen: Rect, struts: impl IntoIterator<Item = &'a Strut>) -> Rect {
    let mut edges = Strut::default();
    for strut in struts {
        edges.left = edges.left.max(strut.left);
        edges.right = edges.right.max(strut.right);
        edges.top = edges.top.max(strut.top);
        edges.bottom = edges.bottom.max(strut.bottom);
    }

    let left = edges.left as i32;
    let top = edges.top as i32;
    Rect::new(
        screen.x + left,
        screen.y + top,
        (screen.width - left - edges.right as i32).max(0),
        (screen.height - top - edges.bottom as i32).max(0),
    )
}

/// Maximal free rectangles of `area` once every obstacle is cut out.
///
/// The result may contain overlapping rectangles.
pub fn free_space(area: Rect, obstacles: &[Rect]) -> Vec<Rect> {
    let mut spaces = vec![area];
    for obstacle in obstacles {
        spaces = spaces
            .iter()
            .flat_map(|space| space.subtract(obstacle))
            .collect();
    }
    spaces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_frame_and_client_are_inverse() {
        let margin = Margin {
            left: 1,
            top: 19,
            right: 1,
            bottom: 7,
        };
        let client = Rect::new(100, 100, 640, 480);
        let frame = margin.frame_around(client);
        assert_eq!(frame, Rect::new(99, 81, 642, 506));
        assert_eq!(margin.client_within(frame), client);
    }

    #[test]
    fn usable_area_without_struts_is_screen() {
        let screen = Rect::new(0, 0, 800, 600);
        assert_eq!(usable_area(screen, &[]), screen);
    }

    #[test]
    fn usable_area_takes_max_per_edge() {
        let screen = Rect::new(0, 0, 800, 600);
        let struts = [
            Strut {
                top: 20,
                ..Default::default()
            },
            Strut {
                top: 30,
                ..Default::default()
            },
        ];
        let area = usable_area(screen, &struts);
        assert_eq!(area, Rect::new(0, 30, 800, 570));
    }

    #[test]
    fn usable_area_combines_edges() {
        let screen = Rect::new(0, 0, 1024, 768);
        let struts = [
            Strut {
                left: 64,
                bottom: 24,
                ..Default::default()
            },
            Strut {
                right: 10,
                ..Default::default()
            },
        ];
        let area = usable_area(screen, &struts);
        assert_eq!(area, Rect::new(64, 0, 950, 744));
        assert!(screen.contains(&area));
    }

    #[test]
    fn free_space_around_left_half() {
        let area = Rect::new(0, 0, 800, 600);
        let spaces = free_space(area, &[Rect::new(0, 0, 400, 600)]);
        assert_eq!(spaces, vec![Rect::new(400, 0, 400, 600)]);
    }

    #[test]
    fn free_space_full_cover_is_empty() {
        let area = Rect::new(0, 0, 800, 600);
        assert!(free_space(area, &[area]).is_empty());
    }

    #[test]
    fn free_space_never_overlaps_obstacles() {
        let area = Rect::new(0, 0, 800, 600);
        let obstacles = [Rect::new(0, 0, 300, 200), Rect::new(500, 300, 200, 200)];
        for space in free_space(area, &obstacles) {
            assert!(area.contains(&space));
            for obstacle in &obstacles {
                assert!(!space.intersects(obstacle), "{space:?} hits {obstacle:?}");
            }
        }
    }
}
