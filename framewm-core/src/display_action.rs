use crate::models::{Handle, Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// These are responses from the frame engine.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayAction<H: Handle> {
    /// Move a native window to a new position.
    #[serde(bound = "")]
    MoveWindow(WindowHandle<H>, i32, i32),

    /// Resize a native window.
    #[serde(bound = "")]
    ResizeWindow(WindowHandle<H>, u32, u32),

    /// Move and resize a native window in one request.
    #[serde(bound = "")]
    MoveResizeWindow(WindowHandle<H>, i32, i32, u32, u32),

    /// Reparent a window into a new container at the given offset.
    /// `None` reparents back to the root window.
    #[serde(bound = "")]
    ReparentWindow {
        window: WindowHandle<H>,
        parent: Option<WindowHandle<H>>,
        x: i32,
        y: i32,
    },

    #[serde(bound = "")]
    ShowWindow(WindowHandle<H>),

    #[serde(bound = "")]
    HideWindow(WindowHandle<H>),

    /// Sets the "z-index" order of the frames,
    /// first in the array is top most.
    #[serde(bound = "")]
    SetWindowOrder(Vec<WindowHandle<H>>),

    #[serde(bound = "")]
    SetBorderWidth(WindowHandle<H>, u32),

    #[serde(bound = "")]
    SetBorderColor(WindowHandle<H>, u64),

    /// Composite alpha for a frame toplevel, 0-255.
    #[serde(bound = "")]
    SetWindowAlpha(WindowHandle<H>, u8),

    /// Change the cursor shown while the pointer is over a frame part.
    #[serde(bound = "")]
    SetCursor(WindowHandle<H>, Cursor),

    /// Actively grab the pointer for a drag, showing the given cursor.
    GrabPointer(Cursor),

    UngrabPointer,

    /// Move the pointer to an absolute root position.
    WarpPointer(i32, i32),

    /// Draw the rubber-band rectangle for a non-opaque move/resize.
    DrawOutline(Rect),

    ClearOutline,

    SetCurrentWorkspace(usize),

    /// Used to let the WM know of the workspace for a given window.
    #[serde(bound = "")]
    SetWindowWorkspace(WindowHandle<H>, usize),

    /// Send a synthetic configure notify so the client learns its
    /// root-relative position without being resized.
    #[serde(bound = "")]
    ConfigureNotify {
        window: WindowHandle<H>,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        border: u32,
    },

    /// The decoration extents around the client changed.
    #[serde(bound = "")]
    UpdateFrameExtents {
        window: WindowHandle<H>,
        left: u32,
        right: u32,
        top: u32,
        bottom: u32,
    },

    /// A client was dropped outside every frame during a tab drag; the
    /// window-lifecycle layer should give it a frame of its own here.
    #[serde(bound = "")]
    DetachClient {
        client: WindowHandle<H>,
        x: i32,
        y: i32,
    },
}

/// Cursors the display server is expected to provide for drags and
/// frame parts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Move,
    ResizeTopLeft,
    ResizeTop,
    ResizeTopRight,
    ResizeLeft,
    ResizeRight,
    ResizeBottomLeft,
    ResizeBottom,
    ResizeBottomRight,
}
