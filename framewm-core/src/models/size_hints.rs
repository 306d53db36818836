use serde::{Deserialize, Serialize};

/// WM normal hints for a client, reduced to the parts the frame engine
/// honors: minimum/maximum size, resize increments with their base,
/// and the requested gravity.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHints {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub width_inc: u32,
    pub height_inc: u32,
    pub base_width: u32,
    pub base_height: u32,
    pub gravity: crate::models::Gravity,
}

impl Default for SizeHints {
    fn default() -> Self {
        Self {
            min_width: 1,
            min_height: 1,
            max_width: 0,
            max_height: 0,
            width_inc: 1,
            height_inc: 1,
            base_width: 0,
            base_height: 0,
            gravity: crate::models::Gravity::NorthWest,
        }
    }
}

impl SizeHints {
    /// Closest hint-respecting size to the request. Increments round
    /// down from the base so the result never exceeds the requested
    /// size, which keeps maximized windows inside their target area.
    /// A max of 0 means unconstrained.
    #[must_use]
    pub fn apply(&self, width: u32, height: u32) -> (u32, u32) {
        (
            Self::apply_axis(
                width,
                self.min_width,
                self.max_width,
                self.width_inc,
                self.base_width,
            ),
            Self::apply_axis(
                height,
                self.min_height,
                self.max_height,
                self.height_inc,
                self.base_height,
            ),
        )
    }

    fn apply_axis(requested: u32, min: u32, max: u32, inc: u32, base: u32) -> u32 {
        let mut size = requested.max(min.max(1));
        if max > 0 {
            size = size.min(max);
        }
        if inc > 1 && size > base {
            size = base + ((size - base) / inc) * inc;
            size = size.max(min.max(1));
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconstrained() {
        let hints = SizeHints::default();
        assert_eq!(hints.apply(640, 480), (640, 480));
    }

    #[test]
    fn clamps_to_min_and_max() {
        let hints = SizeHints {
            min_width: 100,
            min_height: 50,
            max_width: 800,
            max_height: 600,
            ..SizeHints::default()
        };
        assert_eq!(hints.apply(10, 10), (100, 50));
        assert_eq!(hints.apply(1000, 1000), (800, 600));
    }

    #[test]
    fn increments_round_down_from_base() {
        // terminal-style hints: 8x16 cells over a 4x8 base
        let hints = SizeHints {
            width_inc: 8,
            height_inc: 16,
            base_width: 4,
            base_height: 8,
            ..SizeHints::default()
        };
        assert_eq!(hints.apply(645, 485), (4 + 80 * 8, 8 + 29 * 16));
    }
}
