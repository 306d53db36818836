use crate::config::ResizeModel;
use crate::display_action::Cursor;
use crate::models::{Handle, Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// The frame corner or edge a drag is anchored to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceCorner {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    #[default]
    BottomRight,
}

impl ReferenceCorner {
    /// Pick the resize direction from the grab point, frame-relative.
    /// The percent check must be right: 0% always fails, 100% always
    /// succeeds.
    #[must_use]
    pub fn from_grab(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        model: ResizeModel,
        corner_size_px: i32,
        corner_size_pc: i32,
    ) -> Self {
        match model {
            ResizeModel::TopLeft => return Self::TopLeft,
            ResizeModel::Top => return Self::Top,
            ResizeModel::TopRight => return Self::TopRight,
            ResizeModel::Left => return Self::Left,
            ResizeModel::Right => return Self::Right,
            ResizeModel::BottomLeft => return Self::BottomLeft,
            ResizeModel::Bottom => return Self::Bottom,
            ResizeModel::BottomRight => return Self::BottomRight,
            ResizeModel::Center => return Self::Center,
            ResizeModel::Quadrant => {
                return match (x > w / 2, y > h / 2) {
                    (false, false) => Self::TopLeft,
                    (true, false) => Self::TopRight,
                    (false, true) => Self::BottomLeft,
                    (true, true) => Self::BottomRight,
                };
            }
            ResizeModel::EdgeOrCorner => {}
        }

        let cx = w / 2;
        let cy = h / 2;
        let test_corner = |xy: i32, wh: i32| xy < corner_size_px || 100 * xy < corner_size_pc * wh;
        if x < cx && test_corner(x, cx) {
            if y < cy && test_corner(y, cy) {
                return Self::TopLeft;
            } else if test_corner(h - y - 1, h - cy) {
                return Self::BottomLeft;
            }
        } else if test_corner(w - x - 1, w - cx) {
            if y < cy && test_corner(y, cy) {
                return Self::TopRight;
            } else if test_corner(h - y - 1, h - cy) {
                return Self::BottomRight;
            }
        }

        // not a corner; nearest edge instead
        if cy - (y - cy).abs() < cx - (x - cx).abs() {
            if y > cy {
                Self::Bottom
            } else {
                Self::Top
            }
        } else if x > cx {
            Self::Right
        } else {
            Self::Left
        }
    }

    #[must_use]
    pub const fn cursor(self) -> Cursor {
        match self {
            Self::TopLeft => Cursor::ResizeTopLeft,
            Self::Top => Cursor::ResizeTop,
            Self::TopRight => Cursor::ResizeTopRight,
            Self::Left => Cursor::ResizeLeft,
            Self::Center => Cursor::Move,
            Self::Right => Cursor::ResizeRight,
            Self::BottomLeft => Cursor::ResizeBottomLeft,
            Self::Bottom => Cursor::ResizeBottom,
            Self::BottomRight => Cursor::ResizeBottomRight,
        }
    }

    /// Turn an x coordinate relative to this corner of the head's
    /// usable area into an absolute one.
    #[must_use]
    pub fn translate_x(self, x: i32, usable: Rect, w: i32, border: i32) -> i32 {
        let bw = 2 * border;
        match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => x + usable.x,
            Self::TopRight | Self::Right | Self::BottomRight => usable.right() - w - bw - x,
            Self::Top | Self::Center | Self::Bottom => x + (usable.x + usable.right() - w - bw) / 2,
        }
    }

    #[must_use]
    pub fn translate_y(self, y: i32, usable: Rect, h: i32, border: i32) -> i32 {
        let bw = 2 * border;
        match self {
            Self::TopLeft | Self::Top | Self::TopRight => y + usable.y,
            Self::BottomLeft | Self::Bottom | Self::BottomRight => usable.bottom() - h - bw - y,
            Self::Left | Self::Center | Self::Right => y + (usable.y + usable.bottom() - h - bw) / 2,
        }
    }
}

/// Live state of one pointer drag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DragSession<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    /// Pointer offset from the frame's top-left at grab time (moving),
    /// or the raw grab point (resizing).
    pub grab_x: i32,
    pub grab_y: i32,
    /// Geometry when the drag started.
    pub base: Rect,
    /// Geometry the drag has reached so far.
    pub last: Rect,
    /// Last pointer position seen, for workspace-warp deltas.
    pub pointer_x: i32,
    pub pointer_y: i32,
    pub corner: ReferenceCorner,
    pub origin_workspace: usize,
    /// Client being dragged out of its frame during a tab drag.
    #[serde(bound = "")]
    pub tab: Option<WindowHandle<H>>,
    /// Rubber band currently on screen, when dragging non-opaquely.
    pub outline: Option<Rect>,
    /// Frame under the pointer a dragged tab would attach to.
    #[serde(bound = "")]
    pub attach_target: Option<WindowHandle<H>>,
}

impl<H: Handle> DragSession<H> {
    pub fn new(handle: WindowHandle<H>, grab_x: i32, grab_y: i32, base: Rect) -> Self {
        Self {
            handle,
            grab_x,
            grab_y,
            base,
            last: base,
            pointer_x: 0,
            pointer_y: 0,
            corner: ReferenceCorner::default(),
            origin_workspace: 0,
            tab: None,
            outline: None,
            attach_target: None,
        }
    }
}

/// What the pointer is currently doing to a frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode<H: Handle> {
    #[default]
    Normal,
    #[serde(bound = "")]
    Moving(DragSession<H>),
    #[serde(bound = "")]
    Resizing(DragSession<H>),
    /// Dragging a tab, possibly out of its frame.
    #[serde(bound = "")]
    Tabbing(DragSession<H>),
}

impl<H: Handle> Mode<H> {
    #[must_use]
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    #[must_use]
    pub fn dragged_window(&self) -> Option<WindowHandle<H>> {
        match self {
            Self::Normal => None,
            Self::Moving(s) | Self::Resizing(s) | Self::Tabbing(s) => Some(s.handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_or_corner_picks_corners_and_edges() {
        let pick = |x, y| {
            ReferenceCorner::from_grab(x, y, 200, 100, ResizeModel::EdgeOrCorner, 10, 0)
        };
        assert_eq!(pick(2, 3), ReferenceCorner::TopLeft);
        assert_eq!(pick(197, 97), ReferenceCorner::BottomRight);
        assert_eq!(pick(2, 96), ReferenceCorner::BottomLeft);
        // middle of the top edge
        assert_eq!(pick(100, 3), ReferenceCorner::Top);
        // middle of the left edge
        assert_eq!(pick(3, 50), ReferenceCorner::Left);
    }

    #[test]
    fn corner_percent_bounds() {
        // 0% never makes a corner, 100% always does
        let zero = ReferenceCorner::from_grab(30, 30, 200, 100, ResizeModel::EdgeOrCorner, 0, 0);
        assert!(matches!(
            zero,
            ReferenceCorner::Top | ReferenceCorner::Left
        ));
        let full = ReferenceCorner::from_grab(30, 30, 200, 100, ResizeModel::EdgeOrCorner, 0, 100);
        assert_eq!(full, ReferenceCorner::TopLeft);
    }

    #[test]
    fn fixed_models_ignore_grab_point() {
        let c = ReferenceCorner::from_grab(5, 5, 200, 100, ResizeModel::Center, 10, 30);
        assert_eq!(c, ReferenceCorner::Center);
    }

    #[test]
    fn translate_anchors_to_usable_area() {
        let usable = Rect::new(0, 20, 1920, 1060);
        // 10px from the right edge of a 300px-wide frame with 1px border
        let x = ReferenceCorner::Right.translate_x(10, usable, 300, 1);
        assert_eq!(x, 1920 - 300 - 2 - 10);
        let y = ReferenceCorner::Top.translate_y(5, usable, 200, 1);
        assert_eq!(y, 25);
    }
}
