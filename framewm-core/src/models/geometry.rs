use serde::{Deserialize, Serialize};

/// A screen-space rectangle. Width and height are kept signed so that
/// drag arithmetic can pass through transient negative sizes before
/// clamping.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Rectangle grown by a uniform border on every side.
    #[must_use]
    pub const fn with_border(&self, bw: i32) -> Self {
        Self {
            x: self.x - bw,
            y: self.y - bw,
            w: self.w + 2 * bw,
            h: self.h + 2 * bw,
        }
    }

    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
