//! X11 window-gravity offset math, frame-to-client and back.
use serde::{Deserialize, Serialize};

/// The reference point of a window that stays pinned when decoration
/// is added around it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
    /// The client's own top-left is pinned regardless of decoration.
    Static,
}

impl Gravity {
    /// The `(x, y)` shift a frame must make so that the gravity's
    /// reference point lands where the bare client's would have been.
    ///
    /// Gravity calculations are independent of the client window's
    /// width and height; only the decoration extents matter. The
    /// titlebar and handle heights must already be zero when the
    /// corresponding decoration is off.
    #[must_use]
    pub fn offsets(
        self,
        client_bw: u32,
        frame_bw: u32,
        titlebar_height: u32,
        handle_height: u32,
    ) -> (i32, i32) {
        let bw_diff = client_bw as i32 - frame_bw as i32;
        let height_diff = 2 * bw_diff - titlebar_height as i32 - handle_height as i32;
        let width_diff = 2 * bw_diff;

        let mut x_offset = 0;
        let mut y_offset = 0;

        match self {
            Self::SouthWest | Self::South | Self::SouthEast => y_offset = height_diff,
            Self::West | Self::Center | Self::East => y_offset = height_diff / 2,
            _ => {}
        }

        match self {
            Self::NorthEast | Self::East | Self::SouthEast => x_offset = width_diff,
            Self::North | Self::Center | Self::South => x_offset = width_diff / 2,
            _ => {}
        }

        if self == Self::Static {
            x_offset = bw_diff;
            y_offset = bw_diff - titlebar_height as i32;
        }

        (x_offset, y_offset)
    }

    /// Translate a point between client space and frame space.
    /// `invert` goes from frame space back to client space and is the
    /// exact inverse of the forward direction.
    #[must_use]
    pub fn translate(
        self,
        x: i32,
        y: i32,
        client_bw: u32,
        frame_bw: u32,
        titlebar_height: u32,
        handle_height: u32,
        invert: bool,
    ) -> (i32, i32) {
        let (mut dx, mut dy) = self.offsets(client_bw, frame_bw, titlebar_height, handle_height);
        if invert {
            dx = -dx;
            dy = -dy;
        }
        (x + dx, y + dy)
    }

    pub const ALL: [Gravity; 10] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::Center,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
        Self::Static,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn northwest_never_moves() {
        assert_eq!(Gravity::NorthWest.offsets(0, 5, 20, 5), (0, 0));
    }

    #[test]
    fn southeast_titlebar_and_handle() {
        // client bw 0, frame bw 1, titlebar 20, handle 5
        let (x, y) = Gravity::SouthEast.translate(0, 0, 0, 1, 20, 5, false);
        assert_eq!(x, -2);
        assert_eq!(y, -27);
    }

    #[test]
    fn static_pins_client_top_left() {
        assert_eq!(Gravity::Static.offsets(2, 1, 20, 0), (1, -19));
    }

    #[test]
    fn round_trip_all_gravities() {
        for g in Gravity::ALL {
            for (client_bw, frame_bw) in [(0, 0), (0, 1), (2, 1), (5, 3)] {
                let (x, y) = g.translate(40, 60, client_bw, frame_bw, 21, 6, false);
                let back = g.translate(x, y, client_bw, frame_bw, 21, 6, true);
                assert_eq!(back, (40, 60), "{g:?} bw {client_bw}/{frame_bw}");
            }
        }
    }
}
