//! Tab strip bookkeeping: placement table, orientation, and the
//! ordered set of tabbed clients.
use crate::models::{Handle, Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// Whether tabs render inside the titlebar or as a free-floating
/// bordered strip next to the frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabMode {
    #[default]
    Internal,
    External,
}

/// Text/layout rotation of the strip.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Rot0,
    Rot90,
    Rot270,
}

/// How tabs pack inside the strip.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    /// Share the available length evenly (internal mode).
    Relative,
}

/// Where an external tab strip sits around the frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabPlacement {
    #[default]
    TopLeft,
    Top,
    TopRight,
    BottomLeft,
    Bottom,
    BottomRight,
    LeftTop,
    Left,
    LeftBottom,
    RightTop,
    Right,
    RightBottom,
}

impl TabPlacement {
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::TopLeft
            | Self::Top
            | Self::TopRight
            | Self::BottomLeft
            | Self::Bottom
            | Self::BottomRight => Orientation::Rot0,
            Self::LeftTop | Self::Left | Self::LeftBottom => Orientation::Rot270,
            Self::RightTop | Self::Right | Self::RightBottom => Orientation::Rot90,
        }
    }

    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::TopLeft | Self::BottomLeft => Alignment::Left,
            Self::Top | Self::Bottom | Self::Left => Alignment::Center,
            Self::TopRight | Self::BottomRight | Self::LeftTop => Alignment::Right,
            Self::LeftBottom | Self::RightTop | Self::Right | Self::RightBottom => Alignment::Left,
        }
    }

    /// Whether the strip runs along the frame's width rather than its
    /// height.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(
            self,
            Self::TopLeft
                | Self::Top
                | Self::TopRight
                | Self::BottomLeft
                | Self::Bottom
                | Self::BottomRight
        )
    }
}

/// What the strip's native window is currently reparented to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabStripParent {
    #[default]
    Titlebar,
    Root,
}

/// The tab container. Geometry is root-relative when the parent is
/// `Root`, titlebar-relative otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TabStrip<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub geometry: Rect,
    pub border_width: u32,
    pub visible: bool,
    pub parent: TabStripParent,
    #[serde(bound = "")]
    pub items: Vec<WindowHandle<H>>,
    pub orientation: Orientation,
    pub alignment: Alignment,
    /// Longest the strip may grow along its axis; 0 is unconstrained.
    pub max_total_size: u32,
    /// Widest a single tab may be; 0 shares the strip evenly.
    pub max_size_per_client: u32,
}

impl<H: Handle> TabStrip<H> {
    pub fn new(handle: WindowHandle<H>) -> Self {
        Self {
            handle,
            geometry: Rect::new(0, 0, 1, 1),
            border_width: 0,
            visible: false,
            parent: TabStripParent::Titlebar,
            items: Vec::new(),
            orientation: Orientation::Rot0,
            alignment: Alignment::Relative,
            max_total_size: 0,
            max_size_per_client: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, item: WindowHandle<H>) -> Option<usize> {
        self.items.iter().position(|i| *i == item)
    }

    pub fn insert(&mut self, item: WindowHandle<H>) {
        if self.find(item).is_none() {
            self.items.push(item);
        }
    }

    pub fn remove(&mut self, item: WindowHandle<H>) -> bool {
        match self.find(item) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Shift an item by `movement` positions, wrapping around the ends.
    /// A movement that is a whole number of laps is a no-op.
    pub fn move_item(&mut self, item: WindowHandle<H>, movement: isize) -> bool {
        let len = self.items.len() as isize;
        let Some(index) = self.find(item) else {
            return false;
        };
        if len == 0 || movement.rem_euclid(len) == 0 {
            return false;
        }
        let new_index = (index as isize + movement).rem_euclid(len) as usize;
        let item = self.items.remove(index);
        self.items.insert(new_index, item);
        true
    }

    /// Drop `item` on the left half of `dest`. The forward branch moves
    /// one position short of the raw distance; long-standing behavior
    /// tab reordering depends on.
    pub fn move_item_left_of(&mut self, item: WindowHandle<H>, dest: WindowHandle<H>) {
        let (Some(dest_pos), Some(cur_pos)) = (self.find(dest), self.find(item)) else {
            return;
        };
        let mut movement = dest_pos as isize - cur_pos as isize;
        if movement > 0 {
            movement -= 1;
        }
        self.move_item(item, movement);
    }

    /// Drop `item` on the right half of `dest`.
    pub fn move_item_right_of(&mut self, item: WindowHandle<H>, dest: WindowHandle<H>) {
        let (Some(dest_pos), Some(cur_pos)) = (self.find(dest), self.find(item)) else {
            return;
        };
        let mut movement = dest_pos as isize - cur_pos as isize;
        if movement < 0 {
            movement += 1;
        }
        self.move_item(item, movement);
    }

    /// Length the strip wants along its axis, given its items and size
    /// caps.
    pub fn preferred_length(&self) -> u32 {
        if self.items.is_empty() {
            return 1;
        }
        let per_client = if self.max_size_per_client > 0 {
            self.max_size_per_client
        } else if self.max_total_size > 0 {
            self.max_total_size / self.items.len() as u32
        } else {
            return 1;
        };
        let natural = per_client.saturating_mul(self.items.len() as u32);
        let capped = if self.max_total_size > 0 {
            natural.min(self.max_total_size)
        } else {
            natural
        };
        capped.max(1)
    }

    /// Re-derive the strip rectangle from orientation, preferred length
    /// and the given thickness across the axis.
    pub fn relayout(&mut self, thickness: u32) {
        let length = self.preferred_length() as i32;
        let thickness = thickness.max(1) as i32;
        match self.orientation {
            Orientation::Rot0 => {
                self.geometry.w = length;
                self.geometry.h = thickness;
            }
            Orientation::Rot90 | Orientation::Rot270 => {
                self.geometry.w = thickness;
                self.geometry.h = length;
            }
        }
    }
}
