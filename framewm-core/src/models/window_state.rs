use crate::models::Rect;
use bitflags::bitflags;
use serde::{de::Visitor, Deserialize, Serialize};

bitflags! {
    /// Which chrome elements a frame carries. `ENABLED` gates the whole
    /// mask; when it is absent the frame is rendered bare.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DecorMask: u32 {
        const TITLEBAR = 1 << 0;
        const HANDLE   = 1 << 1;
        const BORDER   = 1 << 2;
        const ICONIFY  = 1 << 3;
        const MAXIMIZE = 1 << 4;
        const CLOSE    = 1 << 5;
        const MENU     = 1 << 6;
        const STICKY   = 1 << 7;
        const SHADE    = 1 << 8;
        const TAB      = 1 << 9;
        const ENABLED  = 1 << 10;

        const NORMAL = Self::TITLEBAR.bits() | Self::HANDLE.bits() | Self::BORDER.bits()
            | Self::ICONIFY.bits() | Self::MAXIMIZE.bits() | Self::CLOSE.bits()
            | Self::MENU.bits() | Self::STICKY.bits() | Self::SHADE.bits()
            | Self::TAB.bits() | Self::ENABLED.bits();
        const TINY = Self::TITLEBAR.bits() | Self::ICONIFY.bits() | Self::MENU.bits()
            | Self::TAB.bits() | Self::ENABLED.bits();
        const TOOL = Self::TITLEBAR.bits() | Self::MENU.bits() | Self::ENABLED.bits();
    }
}

impl Default for DecorMask {
    fn default() -> Self {
        Self::NORMAL
    }
}

bitflags! {
    /// Maximize state, one bit per axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Maximized: u32 {
        const HORZ = 1 << 0;
        const VERT = 1 << 1;
        const FULL = Self::HORZ.bits() | Self::VERT.bits();
    }
}

impl Maximized {
    /// The state a maximize request toggles into: requesting full
    /// toggles between full and none, requesting a single axis flips
    /// just that axis.
    #[must_use]
    pub fn toggled(self, request: Maximized) -> Maximized {
        if request == Maximized::FULL {
            if self == Maximized::FULL {
                Maximized::empty()
            } else {
                Maximized::FULL
            }
        } else {
            self ^ request
        }
    }
}

/// Semantic window state persisted across every frame operation. The
/// geometry always reflects the last committed frame geometry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    pub geometry: Rect,
    pub maximized: Maximized,
    pub shaded: bool,
    pub stuck: bool,
    pub fullscreen: bool,
    pub iconic: bool,
    pub focused: bool,
    pub deco_mask: DecorMask,
}

impl WindowState {
    /// Record the geometry a restore should return to. Saves are elided
    /// per axis while that axis is maximized and entirely while
    /// fullscreen, so the restore rect survives the maximized commit.
    /// A shaded frame never saves its collapsed height.
    pub fn save_geometry(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if self.fullscreen || self.maximized == Maximized::FULL {
            return;
        }
        if !self.maximized.contains(Maximized::HORZ) {
            self.geometry.x = x;
            self.geometry.w = w;
        }
        if !self.maximized.contains(Maximized::VERT) {
            self.geometry.y = y;
            if !self.shaded {
                self.geometry.h = h;
            }
        }
    }

    /// The mask with the enabled gate applied; an ungated mask decorates
    /// nothing, and fullscreen suppresses all decoration.
    #[must_use]
    pub fn effective_mask(&self) -> DecorMask {
        if self.fullscreen || !self.deco_mask.contains(DecorMask::ENABLED) {
            DecorMask::empty()
        } else {
            self.deco_mask
        }
    }

    #[must_use]
    pub fn uses_titlebar(&self) -> bool {
        self.effective_mask().contains(DecorMask::TITLEBAR)
    }

    #[must_use]
    pub fn uses_handle(&self) -> bool {
        self.effective_mask().contains(DecorMask::HANDLE) && !self.shaded
    }

    #[must_use]
    pub fn uses_border(&self) -> bool {
        self.effective_mask().contains(DecorMask::BORDER)
    }

    #[must_use]
    pub fn uses_tabs(&self) -> bool {
        self.effective_mask().contains(DecorMask::TAB)
    }

    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.maximized == Maximized::FULL
    }

    #[must_use]
    pub fn is_maximized_horz(&self) -> bool {
        self.maximized.contains(Maximized::HORZ)
    }

    #[must_use]
    pub fn is_maximized_vert(&self) -> bool {
        self.maximized.contains(Maximized::VERT)
    }
}

// serde impls (derive is not working with the bitflags macro)

impl Serialize for DecorMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for DecorMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MaskVisitor;

        impl<'de> Visitor<'de> for MaskVisitor {
            type Value = DecorMask;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bitfield on 32 bits")
            }

            fn visit_u32<E>(self, v: u32) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(DecorMask::from_bits_retain(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(DecorMask::from_bits_retain(v as u32))
            }
        }

        deserializer.deserialize_u32(MaskVisitor)
    }
}

impl Serialize for Maximized {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Maximized {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MaskVisitor;

        impl<'de> Visitor<'de> for MaskVisitor {
            type Value = Maximized;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bitfield on 32 bits")
            }

            fn visit_u32<E>(self, v: u32) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Maximized::from_bits_retain(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Maximized::from_bits_retain(v as u32))
            }
        }

        deserializer.deserialize_u32(MaskVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_full_flips_between_full_and_none() {
        assert_eq!(Maximized::empty().toggled(Maximized::FULL), Maximized::FULL);
        assert_eq!(Maximized::FULL.toggled(Maximized::FULL), Maximized::empty());
        // partially maximized goes to full, not none
        assert_eq!(Maximized::HORZ.toggled(Maximized::FULL), Maximized::FULL);
    }

    #[test]
    fn toggle_axis_is_xor() {
        assert_eq!(Maximized::FULL.toggled(Maximized::VERT), Maximized::HORZ);
        assert_eq!(Maximized::HORZ.toggled(Maximized::VERT), Maximized::FULL);
    }

    #[test]
    fn save_skips_maximized_axes() {
        let mut state = WindowState {
            geometry: Rect::new(10, 10, 100, 100),
            maximized: Maximized::HORZ,
            ..WindowState::default()
        };
        state.save_geometry(50, 60, 300, 200);
        assert_eq!(state.geometry, Rect::new(10, 60, 100, 200));

        state.maximized = Maximized::FULL;
        state.save_geometry(0, 0, 1920, 1080);
        assert_eq!(state.geometry, Rect::new(10, 60, 100, 200));
    }

    #[test]
    fn shaded_height_is_never_saved() {
        let mut state = WindowState {
            geometry: Rect::new(10, 10, 100, 100),
            shaded: true,
            ..WindowState::default()
        };
        state.save_geometry(50, 60, 300, 22);
        assert_eq!(state.geometry, Rect::new(50, 60, 300, 100));
    }

    #[test]
    fn fullscreen_strips_all_decoration() {
        let state = WindowState {
            fullscreen: true,
            ..WindowState::default()
        };
        assert!(!state.uses_titlebar());
        assert!(!state.uses_border());
    }

    #[test]
    fn shade_suppresses_handle_only() {
        let state = WindowState {
            shaded: true,
            ..WindowState::default()
        };
        assert!(state.uses_titlebar());
        assert!(!state.uses_handle());
    }

    #[test]
    fn disabled_gate_decorates_nothing() {
        let state = WindowState {
            deco_mask: DecorMask::NORMAL - DecorMask::ENABLED,
            ..WindowState::default()
        };
        assert_eq!(state.effective_mask(), DecorMask::empty());
    }
}
