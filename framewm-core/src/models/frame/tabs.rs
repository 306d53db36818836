//! Tab-mode switching and external tab strip alignment.
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::{Alignment, Frame, Handle, Orientation, TabMode, TabPlacement, TabStripParent, WindowHandle};

impl<H: Handle> Frame<H> {
    /// Switch tabs between the titlebar and a free-floating strip.
    /// Returns whether tabs ended up visible.
    pub fn set_tab_mode(&mut self, cfg: &impl Config, mode: TabMode) -> bool {
        if self.tab_mode == mode {
            return false;
        }
        self.apply_tab_mode(cfg, mode)
    }

    /// Re-apply the current mode after a property affecting tab
    /// rendering changed (border width, placement, theme).
    pub fn refresh_tab_mode(&mut self, cfg: &impl Config) -> bool {
        self.apply_tab_mode(cfg, self.tab_mode)
    }

    fn apply_tab_mode(&mut self, cfg: &impl Config, mode: TabMode) -> bool {
        self.tab_mode = mode;
        let mut ret = true;

        if mode == TabMode::External {
            self.label.visible = true;
            self.actions
                .push_back(DisplayAction::ShowWindow(self.label.handle));
            self.tabs.border_width = self.border_width;
            self.actions.push_back(DisplayAction::SetBorderWidth(
                self.tabs.handle,
                self.tabs.border_width,
            ));
            self.align_tabs(cfg);

            if self.use_tabs && self.visible {
                self.tabs.visible = true;
                self.actions
                    .push_back(DisplayAction::ShowWindow(self.tabs.handle));
            } else {
                ret = false;
                self.tabs.visible = false;
                self.actions
                    .push_back(DisplayAction::HideWindow(self.tabs.handle));
            }
        } else {
            self.tabs.alignment = Alignment::Relative;
            self.tabs.orientation = Orientation::Rot0;
            if self.tabs.parent == TabStripParent::Root {
                self.tabs.parent = TabStripParent::Titlebar;
                self.tabs.geometry = self.label.geometry;
                self.actions.push_back(DisplayAction::ReparentWindow {
                    window: self.tabs.handle,
                    parent: Some(self.titlebar.handle),
                    x: self.label.geometry.x,
                    y: self.label.geometry.y,
                });
            }
            self.tabs.border_width = 0;
            self.actions
                .push_back(DisplayAction::SetBorderWidth(self.tabs.handle, 0));
            self.tabs.max_total_size = 0;
            self.tabs.max_size_per_client = 0;

            self.tabs.visible = true;
            self.actions
                .push_back(DisplayAction::ShowWindow(self.tabs.handle));

            if !self.use_tabs {
                ret = false;
            }

            self.label.visible = false;
            self.actions
                .push_back(DisplayAction::HideWindow(self.label.handle));
        }

        ret
    }

    /// Re-derive the external strip's orientation, size caps and
    /// root position from the current placement. Internal strips are
    /// laid out with the titlebar instead.
    pub fn align_tabs(&mut self, cfg: &impl Config) {
        if self.tab_mode != TabMode::External {
            return;
        }

        let placement = cfg.tab_placement();
        let orig_orient = self.tabs.orientation;
        let orig_tabwidth = self.tabs.max_size_per_client;

        if orig_tabwidth != cfg.tab_width() {
            self.tabs.max_size_per_client = cfg.tab_width();
        }

        let bw = self.border_width as i32;
        let size = if placement.is_horizontal() {
            self.width()
        } else {
            self.height()
        };
        self.tabs.orientation = placement.orientation();
        self.tabs.alignment = placement.alignment();
        self.tabs.max_total_size = size.max(1) as u32;
        self.tabs.relayout(self.button_height());

        let w = self.width();
        let h = self.height();
        let xo = self.x_offset(cfg);
        let yo = self.y_offset(cfg);
        let tw = self.tabs.geometry.w;
        let th = self.tabs.geometry.h;

        let mut tab_x = self.x();
        let mut tab_y = self.y();
        match placement {
            TabPlacement::TopLeft => tab_y -= yo,
            TabPlacement::Top => {
                tab_x += (w - tw) / 2;
                tab_y -= yo;
            }
            TabPlacement::TopRight => {
                tab_x += w - tw;
                tab_y -= yo;
            }
            TabPlacement::BottomLeft => tab_y += h + bw,
            TabPlacement::Bottom => {
                tab_x += (w - tw) / 2;
                tab_y += h + bw;
            }
            TabPlacement::BottomRight => {
                tab_x += w - tw;
                tab_y += h + bw;
            }
            TabPlacement::LeftTop => tab_x -= xo,
            TabPlacement::Left => {
                tab_x -= xo;
                tab_y += (h - th) / 2;
            }
            TabPlacement::LeftBottom => {
                tab_x -= xo;
                tab_y += h - th;
            }
            TabPlacement::RightTop => tab_x += w + bw,
            TabPlacement::Right => {
                tab_x += w + bw;
                tab_y += (h - th) / 2;
            }
            TabPlacement::RightBottom => {
                tab_x += w + bw;
                tab_y += h - th;
            }
        }

        // avoid flicker on pure moves: only re-show when orientation or
        // per-item sizing actually changed
        if (self.tabs.orientation != orig_orient
            || self.tabs.max_size_per_client != orig_tabwidth)
            && self.visible
            && self.use_tabs
        {
            self.actions
                .push_back(DisplayAction::ShowWindow(self.tabs.handle));
        }

        if self.tabs.parent != TabStripParent::Root {
            self.tabs.parent = TabStripParent::Root;
            self.tabs.geometry.x = tab_x;
            self.tabs.geometry.y = tab_y;
            self.actions.push_back(DisplayAction::ReparentWindow {
                window: self.tabs.handle,
                parent: None,
                x: tab_x,
                y: tab_y,
            });
        } else if self.tabs.geometry.x != tab_x || self.tabs.geometry.y != tab_y {
            self.tabs.geometry.x = tab_x;
            self.tabs.geometry.y = tab_y;
            self.actions
                .push_back(DisplayAction::MoveWindow(self.tabs.handle, tab_x, tab_y));
        }
    }

    pub fn add_tab(&mut self, client: WindowHandle<H>) {
        self.tabs.insert(client);
    }

    pub fn remove_tab(&mut self, client: WindowHandle<H>) -> bool {
        self.tabs.remove(client)
    }

    /// Reorder a dragged tab onto the half of another tab it was
    /// dropped on.
    pub fn move_tab_left_of(&mut self, tab: WindowHandle<H>, dest: WindowHandle<H>) {
        self.tabs.move_item_left_of(tab, dest);
    }

    pub fn move_tab_right_of(&mut self, tab: WindowHandle<H>, dest: WindowHandle<H>) {
        self.tabs.move_item_right_of(tab, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TestConfig, TestTheme};
    use crate::models::frame::test_support::mock_frame;
    use crate::models::Rect;

    fn external_setup(placement: TabPlacement) -> (Frame<crate::models::MockHandle>, TestConfig, TestTheme) {
        let cfg = TestConfig {
            internal_tabs: false,
            tab_placement: placement,
            ..TestConfig::default()
        };
        let theme = TestTheme::default();
        let mut frame = mock_frame(Rect::new(100, 100, 300, 200));
        frame.reconfigure(&cfg, &theme);
        frame.set_border_width(&cfg, &theme, false);
        frame.set_tab_mode(&cfg, TabMode::External);
        frame.actions.clear();
        (frame, cfg, theme)
    }

    #[test]
    fn switching_to_internal_reparents_to_titlebar() {
        let (mut frame, cfg, _theme) = external_setup(TabPlacement::TopLeft);
        assert_eq!(frame.tabs.parent, TabStripParent::Root);
        frame.set_tab_mode(&cfg, TabMode::Internal);
        assert_eq!(frame.tabs.parent, TabStripParent::Titlebar);
        assert_eq!(frame.tabs.border_width, 0);
        assert_eq!(frame.tabs.max_total_size, 0);
        assert!(frame
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ReparentWindow { parent: Some(_), .. })));
    }

    #[test]
    fn set_same_mode_is_a_noop() {
        let (mut frame, cfg, _theme) = external_setup(TabPlacement::TopLeft);
        assert!(!frame.set_tab_mode(&cfg, TabMode::External));
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn left_placement_offsets_strip_by_its_width() {
        let (mut frame, cfg, _theme) = external_setup(TabPlacement::LeftTop);
        frame.align_tabs(&cfg);
        // vertical strip: thickness across, length down
        assert!(frame.tabs.geometry.w < frame.tabs.geometry.h);
        let xo = frame.x_offset(&cfg);
        assert_eq!(xo, frame.tabs.geometry.w + frame.border_width() as i32);
        assert_eq!(frame.tabs.geometry.x, frame.x() - xo);
        assert_eq!(frame.tabs.geometry.y, frame.y());
    }

    #[test]
    fn bottom_placement_sits_below_frame() {
        let (mut frame, cfg, _theme) = external_setup(TabPlacement::Bottom);
        frame.align_tabs(&cfg);
        assert_eq!(
            frame.tabs.geometry.y,
            frame.y() + frame.height() + frame.border_width() as i32
        );
        // bottom tabs add no y offset; the frame's top edge is bare
        assert_eq!(frame.y_offset(&cfg), 0);
        assert_eq!(frame.height_offset(&cfg), frame.tabs.geometry.h + 1);
    }

    #[test]
    fn offsets_vanish_in_internal_mode() {
        let (mut frame, cfg, _theme) = external_setup(TabPlacement::TopLeft);
        frame.set_tab_mode(&cfg, TabMode::Internal);
        assert_eq!(frame.x_offset(&cfg), 0);
        assert_eq!(frame.y_offset(&cfg), 0);
        assert_eq!(frame.width_offset(&cfg), 0);
        assert_eq!(frame.height_offset(&cfg), 0);
    }
}
