//! Window gravity: where a client's requested position anchors its frame.

use boxwm_common::Rect;
use serde::{Deserialize, Serialize};

use crate::geometry::Margin;

/// ICCCM window gravity. Discriminants match the protocol values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gravity {
    Forget = 0,
    #[default]
    NorthWest = 1,
    North = 2,
    NorthEast = 3,
    West = 4,
    Center = 5,
    East = 6,
    SouthWest = 7,
    South = 8,
    SouthEast = 9,
    Static = 10,
}

impl Gravity {
    pub const ALL: [Gravity; 11] = [
        Gravity::Forget,
        Gravity::NorthWest,
        Gravity::North,
        Gravity::NorthEast,
        Gravity::West,
        Gravity::Center,
        Gravity::East,
        Gravity::SouthWest,
        Gravity::South,
        Gravity::SouthEast,
        Gravity::Static,
    ];

    pub fn from_u32(value: u32) -> Option<Gravity> {
        Self::ALL.get(value as usize).copied()
    }

    /// Horizontal frame offset from the client reference point.
    fn dx(self, margin: &Margin) -> i32 {
        match self {
            Gravity::NorthWest | Gravity::West | Gravity::SouthWest => 0,
            Gravity::North | Gravity::Center | Gravity::South => margin.horizontal() / 2,
            Gravity::NorthEast | Gravity::East | Gravity::SouthEast => margin.horizontal(),
            Gravity::Forget | Gravity::Static => margin.left,
        }
    }

    /// Vertical frame offset from the client reference point.
    fn dy(self, margin: &Margin) -> i32 {
        match self {
            Gravity::NorthWest | Gravity::North | Gravity::NorthEast => 0,
            Gravity::West | Gravity::Center | Gravity::East => margin.vertical() / 2,
            Gravity::SouthWest | Gravity::South | Gravity::SouthEast => margin.vertical(),
            Gravity::Forget | Gravity::Static => margin.top,
        }
    }
}

/// Frame rectangle for a client whose requested geometry is `client`.
///
/// The side or corner named by the gravity stays where the client asked
/// for it; `Static` keeps the client's own pixels in place.
pub fn apply_gravity(client: Rect, margin: &Margin, gravity: Gravity) -> Rect {
    Rect::new(
        client.x - gravity.dx(margin),
        client.y - gravity.dy(margin),
        client.width + margin.horizontal(),
        client.height + margin.vertical(),
    )
}

/// Inverse of [`apply_gravity`]: the client geometry, in the client's own
/// reference frame, for a frame at `frame`.
pub fn restore_gravity(frame: Rect, margin: &Margin, gravity: Gravity) -> Rect {
    Rect::new(
        frame.x + gravity.dx(margin),
        frame.y + gravity.dy(margin),
        frame.width - margin.horizontal(),
        frame.height - margin.vertical(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margin() -> Margin {
        Margin {
            left: 3,
            top: 21,
            right: 5,
            bottom: 9,
        }
    }

    #[test]
    fn round_trip_every_gravity() {
        let client = Rect::new(120, 80, 300, 200);
        for gravity in Gravity::ALL {
            let frame = apply_gravity(client, &margin(), gravity);
            assert_eq!(
                restore_gravity(frame, &margin(), gravity),
                client,
                "{gravity:?}"
            );
        }
    }

    #[test]
    fn round_trip_odd_margins_and_negative_positions() {
        let odd = Margin {
            left: 1,
            top: 17,
            right: 2,
            bottom: 0,
        };
        let client = Rect::new(-40, -7, 33, 11);
        for gravity in Gravity::ALL {
            let frame = apply_gravity(client, &odd, gravity);
            assert_eq!(restore_gravity(frame, &odd, gravity), client);
        }
    }

    #[test]
    fn north_west_anchors_frame_corner() {
        let frame = apply_gravity(Rect::new(10, 10, 100, 100), &margin(), Gravity::NorthWest);
        assert_eq!(frame, Rect::new(10, 10, 108, 130));
    }

    #[test]
    fn south_east_keeps_bottom_right() {
        let client = Rect::new(10, 10, 100, 100);
        let frame = apply_gravity(client, &margin(), Gravity::SouthEast);
        assert_eq!(frame.right(), client.right());
        assert_eq!(frame.bottom(), client.bottom());
    }

    #[test]
    fn static_keeps_client_pixels() {
        let client = Rect::new(50, 60, 100, 100);
        let frame = apply_gravity(client, &margin(), Gravity::Static);
        assert_eq!(margin().client_within(frame), client);
    }

    #[test]
    fn from_u32_matches_protocol_values() {
        assert_eq!(Gravity::from_u32(0), Some(Gravity::Forget));
        assert_eq!(Gravity::from_u32(5), Some(Gravity::Center));
        assert_eq!(Gravity::from_u32(10), Some(Gravity::Static));
        assert_eq!(Gravity::from_u32(11), None);
    }
}
