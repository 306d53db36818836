//! Capability traits the frame engine consumes. The window manager
//! binary supplies real implementations backed by its config files and
//! loaded style; tests use the fakes at the bottom of this file.
use crate::models::{DecorMask, TabPlacement};
use serde::{Deserialize, Serialize};

/// How the corner for an interactive resize is picked from the grab point.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResizeModel {
    /// Nearest quadrant of the frame resizes the matching corner.
    #[default]
    Quadrant,
    /// Grow/shrink around the center.
    Center,
    /// Corners within the configured corner size, nearest edge otherwise.
    EdgeOrCorner,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Where a dragged tab may be dropped to attach to another frame.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AttachArea {
    /// Anywhere over the target frame.
    #[default]
    Window,
    /// Only over the target's titlebar.
    Titlebar,
}

/// Behavioral settings.
pub trait Config {
    fn tab_placement(&self) -> TabPlacement;
    /// Width of external tabs, in pixels.
    fn tab_width(&self) -> u32;
    /// Render tabs inside the titlebar rather than in an external strip.
    fn internal_tabs(&self) -> bool;
    /// Let maximized frames cover external tabs.
    fn max_over_tabs(&self) -> bool;

    fn max_ignore_increment(&self) -> bool;
    fn max_disable_move(&self) -> bool;
    fn max_disable_resize(&self) -> bool;

    /// Snap distance against screen edges and other frames, in pixels.
    /// Zero disables snapping.
    fn edge_snap_threshold(&self) -> i32;
    fn edge_resize_snap_threshold(&self) -> i32;

    fn workspace_warping(&self) -> bool;
    fn workspace_warping_horizontal(&self) -> bool;
    fn workspace_warping_vertical(&self) -> bool;
    /// How many workspaces a horizontal warp skips.
    fn workspace_warping_horizontal_offset(&self) -> i32;
    fn workspace_warping_vertical_offset(&self) -> i32;

    fn opaque_move(&self) -> bool;
    fn opaque_resize(&self) -> bool;

    fn resize_model(&self) -> ResizeModel;
    fn corner_size_px(&self) -> i32;
    /// Corner size as a percentage of the half-width/height, 0..=100.
    fn corner_size_pc(&self) -> i32;

    fn attach_area(&self) -> AttachArea;

    /// Decorations a freshly managed window starts with.
    fn default_decorations(&self) -> DecorMask {
        DecorMask::NORMAL
    }
}

/// Visual settings from the loaded style.
pub trait Theme {
    fn border_width(&self) -> u32;
    fn border_color(&self, focused: bool) -> u64;
    /// Height of the titlebar text area, excluding bevel.
    fn title_height(&self) -> u32;
    fn handle_height(&self) -> u32;
    fn bevel_width(&self) -> u32;
    /// 0-255 composite alpha for the frame.
    fn alpha(&self, focused: bool) -> u8;
}

/// Monitor layout queries. Heads are 0-based.
pub trait ScreenMetrics {
    fn head_count(&self) -> usize;
    /// Full rectangle of a head.
    fn head_rect(&self, head: usize) -> crate::models::Rect;
    /// Head rectangle minus struts (docks, panels).
    fn usable_rect(&self, head: usize) -> crate::models::Rect;
    /// The head containing the point, or the nearest one.
    fn head_at(&self, x: i32, y: i32) -> usize;
    /// Total width across all heads.
    fn total_width(&self) -> u32;
    fn total_height(&self) -> u32;
}

#[cfg(test)]
pub struct TestConfig {
    pub tab_placement: TabPlacement,
    pub internal_tabs: bool,
    pub max_over_tabs: bool,
    pub max_ignore_increment: bool,
    pub max_disable_move: bool,
    pub max_disable_resize: bool,
    pub edge_snap_threshold: i32,
    pub edge_resize_snap_threshold: i32,
    pub workspace_warping: bool,
    pub opaque_move: bool,
    pub opaque_resize: bool,
    pub attach_area: AttachArea,
    pub default_decorations: DecorMask,
}

#[cfg(test)]
impl Default for TestConfig {
    fn default() -> Self {
        Self {
            tab_placement: TabPlacement::TopLeft,
            internal_tabs: true,
            max_over_tabs: false,
            max_ignore_increment: true,
            max_disable_move: false,
            max_disable_resize: false,
            edge_snap_threshold: 10,
            edge_resize_snap_threshold: 0,
            workspace_warping: false,
            opaque_move: true,
            opaque_resize: true,
            attach_area: AttachArea::Window,
            default_decorations: DecorMask::NORMAL,
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn tab_placement(&self) -> TabPlacement {
        self.tab_placement
    }
    fn tab_width(&self) -> u32 {
        64
    }
    fn internal_tabs(&self) -> bool {
        self.internal_tabs
    }
    fn max_over_tabs(&self) -> bool {
        self.max_over_tabs
    }
    fn max_ignore_increment(&self) -> bool {
        self.max_ignore_increment
    }
    fn max_disable_move(&self) -> bool {
        self.max_disable_move
    }
    fn max_disable_resize(&self) -> bool {
        self.max_disable_resize
    }
    fn edge_snap_threshold(&self) -> i32 {
        self.edge_snap_threshold
    }
    fn edge_resize_snap_threshold(&self) -> i32 {
        self.edge_resize_snap_threshold
    }
    fn workspace_warping(&self) -> bool {
        self.workspace_warping
    }
    fn workspace_warping_horizontal(&self) -> bool {
        self.workspace_warping
    }
    fn workspace_warping_vertical(&self) -> bool {
        false
    }
    fn workspace_warping_horizontal_offset(&self) -> i32 {
        1
    }
    fn workspace_warping_vertical_offset(&self) -> i32 {
        1
    }
    fn opaque_move(&self) -> bool {
        self.opaque_move
    }
    fn opaque_resize(&self) -> bool {
        self.opaque_resize
    }
    fn resize_model(&self) -> ResizeModel {
        ResizeModel::EdgeOrCorner
    }
    fn corner_size_px(&self) -> i32 {
        10
    }
    fn corner_size_pc(&self) -> i32 {
        30
    }
    fn attach_area(&self) -> AttachArea {
        self.attach_area
    }
    fn default_decorations(&self) -> DecorMask {
        self.default_decorations
    }
}

#[cfg(test)]
pub struct TestTheme {
    pub border_width: u32,
    pub title_height: u32,
    pub handle_height: u32,
    pub bevel_width: u32,
}

#[cfg(test)]
impl Default for TestTheme {
    fn default() -> Self {
        Self {
            border_width: 1,
            title_height: 22,
            handle_height: 5,
            bevel_width: 1,
        }
    }
}

#[cfg(test)]
impl Theme for TestTheme {
    fn border_width(&self) -> u32 {
        self.border_width
    }
    fn border_color(&self, focused: bool) -> u64 {
        if focused {
            0x00ff_ffff
        } else {
            0x0040_4040
        }
    }
    fn title_height(&self) -> u32 {
        self.title_height
    }
    fn handle_height(&self) -> u32 {
        self.handle_height
    }
    fn bevel_width(&self) -> u32 {
        self.bevel_width
    }
    fn alpha(&self, focused: bool) -> u8 {
        if focused {
            255
        } else {
            200
        }
    }
}
