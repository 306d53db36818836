use crate::config::ScreenMetrics;
use crate::models::Rect;
use serde::{Deserialize, Serialize};

/// One monitor: its physical bounds and the part left over after
/// struts (panels, docks) are carved out.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub bounds: Rect,
    pub usable: Rect,
}

impl Screen {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            usable: bounds,
        }
    }
}

/// The monitor layout the engine was given. Heads are 0-based.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Screens {
    pub heads: Vec<Screen>,
}

impl Screens {
    pub fn single(width: u32, height: u32) -> Self {
        Self {
            heads: vec![Screen::new(Rect::new(0, 0, width as i32, height as i32))],
        }
    }

    fn head(&self, head: usize) -> Screen {
        self.heads
            .get(head)
            .or_else(|| self.heads.first())
            .copied()
            .unwrap_or(Screen::new(Rect::new(0, 0, 1, 1)))
    }
}

impl ScreenMetrics for Screens {
    fn head_count(&self) -> usize {
        self.heads.len()
    }

    fn head_rect(&self, head: usize) -> Rect {
        self.head(head).bounds
    }

    fn usable_rect(&self, head: usize) -> Rect {
        self.head(head).usable
    }

    fn head_at(&self, x: i32, y: i32) -> usize {
        if let Some(idx) = self.heads.iter().position(|s| s.bounds.contains(x, y)) {
            return idx;
        }
        // nearest head by center distance
        let mut best = 0;
        let mut best_dist = i64::MAX;
        for (idx, s) in self.heads.iter().enumerate() {
            let cx = i64::from(s.bounds.x + s.bounds.w / 2);
            let cy = i64::from(s.bounds.y + s.bounds.h / 2);
            let dx = cx - i64::from(x);
            let dy = cy - i64::from(y);
            let dist = dx * dx + dy * dy;
            if dist < best_dist {
                best_dist = dist;
                best = idx;
            }
        }
        best
    }

    fn total_width(&self) -> u32 {
        self.heads.iter().map(|s| s.bounds.right()).max().unwrap_or(1) as u32
    }

    fn total_height(&self) -> u32 {
        self.heads.iter().map(|s| s.bounds.bottom()).max().unwrap_or(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> Screens {
        let mut screens = Screens::single(1920, 1080);
        screens
            .heads
            .push(Screen::new(Rect::new(1920, 0, 1280, 1024)));
        screens
    }

    #[test]
    fn head_at_contains_point() {
        let s = dual();
        assert_eq!(s.head_at(10, 10), 0);
        assert_eq!(s.head_at(2000, 100), 1);
    }

    #[test]
    fn head_at_falls_back_to_nearest() {
        let s = dual();
        assert_eq!(s.head_at(5000, 100), 1);
        assert_eq!(s.head_at(-50, 100), 0);
    }

    #[test]
    fn totals_span_heads() {
        let s = dual();
        assert_eq!(s.total_width(), 3200);
        assert_eq!(s.total_height(), 1080);
    }
}
