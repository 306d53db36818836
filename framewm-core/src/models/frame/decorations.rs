//! Decoration toggles and the state applier: each toggle adjusts the
//! frame height by exactly its own extent plus the one border it does
//! not share with the adjacent decoration.
use crate::config::{Config, ScreenMetrics, Theme};
use crate::display_action::DisplayAction;
use crate::models::{Frame, Handle, Maximized, SizeHints, TabMode};

impl<H: Handle> Frame<H> {
    /// Returns false when tabs were already shown, or are internal and
    /// thus always follow the titlebar.
    pub fn show_tabs(&mut self) -> bool {
        if self.tab_mode() == TabMode::Internal || self.use_tabs {
            self.use_tabs = true;
            return false;
        }

        self.use_tabs = true;
        if self.visible {
            self.tabs.visible = true;
            self.actions
                .push_back(DisplayAction::ShowWindow(self.tabs.handle));
        }
        true
    }

    pub fn hide_tabs(&mut self) -> bool {
        if self.tab_mode() == TabMode::Internal || !self.use_tabs {
            self.use_tabs = false;
            return false;
        }

        self.use_tabs = false;
        self.tabs.visible = false;
        self.actions
            .push_back(DisplayAction::HideWindow(self.tabs.handle));
        true
    }

    pub fn show_titlebar(&mut self) -> bool {
        if self.use_titlebar {
            return false;
        }

        self.titlebar.visible = true;
        self.actions
            .push_back(DisplayAction::ShowWindow(self.titlebar.handle));
        self.use_titlebar = true;

        // only add one borderwidth (the other border is still the "top"
        // border)
        let h = self.height() + self.titlebar.geometry.h + self.deco_border_width as i32;
        self.set_size_raw(self.width(), h);
        true
    }

    pub fn hide_titlebar(&mut self) -> bool {
        if !self.use_titlebar {
            return false;
        }

        self.titlebar.visible = false;
        self.actions
            .push_back(DisplayAction::HideWindow(self.titlebar.handle));
        self.use_titlebar = false;

        let h = self.height() - self.titlebar.geometry.h - self.deco_border_width as i32;
        self.set_size_raw(self.width(), h.max(1));
        true
    }

    pub fn show_handle(&mut self, theme: &impl Theme) -> bool {
        if self.use_handle || theme.handle_height() == 0 {
            return false;
        }

        self.use_handle = true;
        self.handle_bar.visible = true;
        self.grip_left.visible = true;
        self.grip_right.visible = true;
        self.actions
            .push_back(DisplayAction::ShowWindow(self.handle_bar.handle));

        let h = self.height() + self.handle_bar.geometry.h + self.deco_border_width as i32;
        self.set_size_raw(self.width(), h);
        true
    }

    pub fn hide_handle(&mut self) -> bool {
        if !self.use_handle {
            return false;
        }

        self.handle_bar.visible = false;
        self.grip_left.visible = false;
        self.grip_right.visible = false;
        self.actions
            .push_back(DisplayAction::HideWindow(self.handle_bar.handle));
        self.use_handle = false;

        let h = self.height() - self.handle_bar.geometry.h - self.deco_border_width as i32;
        self.set_size_raw(self.width(), h.max(1));
        true
    }

    /// Pick up a changed theme border or a toggled border decoration.
    /// Returns whether anything changed, which callers use to decide
    /// whether to re-emit an extents notification.
    pub fn set_border_width(&mut self, cfg: &impl Config, theme: &impl Theme, do_move: bool) -> bool {
        let border_width = theme.border_width();
        let win_bw = if self.state.uses_border() {
            border_width
        } else {
            0
        };

        let color = theme.border_color(self.state.focused);
        if border_width > 0 && color != self.border_color {
            self.border_color = color;
            for sub in [
                self.window.handle,
                self.titlebar.handle,
                self.handle_bar.handle,
                self.grip_left.handle,
                self.grip_right.handle,
                self.tabs.handle,
            ] {
                self.actions
                    .push_back(DisplayAction::SetBorderColor(sub, color));
            }
        }

        if border_width == self.deco_border_width && win_bw == self.border_width {
            return false;
        }

        let (mut gx, mut gy) = (0, 0);
        if do_move {
            (gx, gy) = self.gravity_translate(0, 0, true);
        }

        // the frame height changes with the borders of the decorations
        // it stacks
        let mut bw_changes = 0;
        if self.use_titlebar {
            bw_changes += border_width as i32 - self.deco_border_width as i32;
        }
        if self.use_handle {
            bw_changes += border_width as i32 - self.deco_border_width as i32;
        }

        self.border_width = win_bw;
        self.actions
            .push_back(DisplayAction::SetBorderWidth(self.window.handle, win_bw));
        for sub in [
            self.titlebar.handle,
            self.handle_bar.handle,
            self.grip_left.handle,
            self.grip_right.handle,
        ] {
            self.actions
                .push_back(DisplayAction::SetBorderWidth(sub, border_width));
        }

        self.refresh_tab_mode(cfg);
        self.deco_border_width = border_width;

        if bw_changes != 0 {
            self.resize(cfg, theme, self.width(), self.height() + bw_changes);
        }

        if self.tab_mode() == TabMode::External {
            self.align_tabs(cfg);
        }

        if do_move {
            self.notify_extents_changed(cfg);
            let (gx, gy) = self.gravity_translate(gx, gy, false);
            if gx != 0 || gy != 0 {
                self.move_to(cfg, theme, gx + self.x(), gy + self.y());
            }
        }

        true
    }

    /// Bring shown decorations in line with the decoration mask,
    /// keeping the client's gravity reference point still. Returns
    /// whether the client-visible extents changed.
    pub fn apply_decorations(&mut self, cfg: &impl Config, theme: &impl Theme, do_move: bool) -> bool {
        let (gx, gy) = self.gravity_translate(0, 0, true);

        let mut client_move = self.set_border_width(cfg, theme, false);

        // tab decoration only matters when external; resolve it before
        // the mode switch in case tabs go external and are meant to be
        // hidden
        if self.state.uses_tabs() {
            client_move |= self.show_tabs();
        } else {
            client_move |= self.hide_tabs();
        }

        // the toggles no-op when already in the requested state
        if self.state.uses_titlebar() {
            client_move |= self.show_titlebar();
            if cfg.internal_tabs() {
                client_move |= self.set_tab_mode(cfg, TabMode::Internal);
            } else {
                client_move |= self.set_tab_mode(cfg, TabMode::External);
            }
        } else {
            client_move |= self.hide_titlebar();
            if self.state.uses_tabs() {
                client_move |= self.set_tab_mode(cfg, TabMode::External);
            }
        }

        if self.state.uses_handle() {
            client_move |= self.show_handle(theme);
        } else {
            client_move |= self.hide_handle();
        }

        let (gx, gy) = self.gravity_translate(gx, gy, false);
        if do_move && (gx != 0 || gy != 0) {
            self.move_to(cfg, theme, gx + self.x(), gy + self.y());
            client_move = true;
        }

        if do_move {
            self.reconfigure(cfg, theme);
            self.state
                .save_geometry(self.x(), self.y(), self.width(), self.height());
        }
        if client_move {
            self.notify_extents_changed(cfg);
        }

        client_move
    }

    /// Re-derive geometry from the semantic state and commit it.
    /// Fullscreen wins over maximize; shade wins over maximize's height
    /// but not its x/width; size hints come last so maximized frames
    /// are only quantized when configured to be.
    pub fn apply_state(
        &mut self,
        cfg: &impl Config,
        theme: &impl Theme,
        screens: &impl ScreenMetrics,
        hints: &SizeHints,
    ) {
        self.apply_decorations(cfg, theme, false);

        let head = screens.head_at(self.x() + self.width() / 2, self.y() + self.height() / 2);
        let usable = screens.usable_rect(head);
        let bw = self.border_width() as i32;

        let mut new = self.state.geometry;

        if self.state.is_maximized_vert() {
            new.y = usable.y;
            new.h = usable.bottom() - new.y - 2 * bw;
            if !cfg.max_over_tabs() {
                new.y += self.y_offset(cfg);
                new.h -= self.height_offset(cfg);
            }
        }
        if self.state.is_maximized_horz() {
            new.x = usable.x;
            new.w = usable.right() - new.x - 2 * bw;
            if !cfg.max_over_tabs() {
                new.x += self.x_offset(cfg);
                new.w -= self.width_offset(cfg);
            }
        }

        if self.state.shaded {
            new.h = self.titlebar.geometry.h;
        } else if self.state.fullscreen {
            new = screens.head_rect(head);
        } else if self.state.maximized == Maximized::empty() || !cfg.max_ignore_increment() {
            let (w, h) = self.apply_size_hints(hints, new.w.max(1) as u32, new.h.max(1) as u32);
            new.w = w as i32;
            new.h = h as i32;
        }

        self.move_resize(cfg, theme, new.x, new.y, new.w, new.h, true, true, true);
        self.notify_extents_changed(cfg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TestConfig, TestTheme};
    use crate::models::frame::test_support::mock_frame;
    use crate::models::{DecorMask, Rect, Screens};

    fn setup() -> (Frame<crate::models::MockHandle>, TestConfig, TestTheme) {
        let cfg = TestConfig::default();
        let theme = TestTheme::default();
        let mut frame = mock_frame(Rect::new(100, 100, 300, 200));
        frame.reconfigure(&cfg, &theme);
        frame.set_border_width(&cfg, &theme, false);
        frame.actions.clear();
        (frame, cfg, theme)
    }

    #[test]
    fn hide_titlebar_changes_height_once() {
        let (mut frame, _cfg, _theme) = setup();
        let h = frame.height();
        let titlebar_extent = frame.titlebar.geometry.h + 1;

        assert!(frame.hide_titlebar());
        assert_eq!(frame.height(), h - titlebar_extent);

        // second call is a no-op
        assert!(!frame.hide_titlebar());
        assert_eq!(frame.height(), h - titlebar_extent);
    }

    #[test]
    fn show_titlebar_restores_height() {
        let (mut frame, _cfg, _theme) = setup();
        let h = frame.height();
        frame.hide_titlebar();
        assert!(frame.show_titlebar());
        assert_eq!(frame.height(), h);
        assert!(!frame.show_titlebar());
    }

    #[test]
    fn handle_toggle_is_idempotent() {
        let (mut frame, _cfg, theme) = setup();
        let h = frame.height();
        assert!(frame.hide_handle());
        assert!(!frame.hide_handle());
        assert!(frame.show_handle(&theme));
        assert!(!frame.show_handle(&theme));
        assert_eq!(frame.height(), h);
    }

    #[test]
    fn zero_height_handle_never_shows() {
        let (mut frame, _cfg, _theme) = setup();
        frame.hide_handle();
        let theme = TestTheme {
            handle_height: 0,
            ..TestTheme::default()
        };
        assert!(!frame.show_handle(&theme));
    }

    #[test]
    fn set_border_width_unchanged_returns_false() {
        let (mut frame, cfg, theme) = setup();
        assert!(!frame.set_border_width(&cfg, &theme, false));
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn disabling_border_decoration_bares_the_window() {
        let (mut frame, cfg, theme) = setup();
        frame.state.deco_mask -= DecorMask::BORDER;
        assert!(frame.set_border_width(&cfg, &theme, false));
        assert_eq!(frame.border_width(), 0);
        assert!(frame.actions.iter().any(|a| matches!(
            a,
            DisplayAction::SetBorderWidth(h, 0) if *h == frame.window.handle
        )));
    }

    #[test]
    fn apply_decorations_follows_mask() {
        let (mut frame, cfg, theme) = setup();
        frame.state.deco_mask = DecorMask::TOOL;
        let changed = frame.apply_decorations(&cfg, &theme, true);
        assert!(changed);
        assert!(frame.use_titlebar);
        assert!(!frame.use_handle);

        // a second application changes nothing further
        assert!(!frame.apply_decorations(&cfg, &theme, true));
    }

    #[test]
    fn apply_state_fullscreen_wins_over_maximize() {
        let (mut frame, cfg, theme) = setup();
        let screens = Screens::single(1920, 1080);
        frame.state.maximized = Maximized::FULL;
        frame.state.fullscreen = true;
        frame.apply_state(&cfg, &theme, &screens, &SizeHints::default());
        assert_eq!(
            (frame.x(), frame.y(), frame.width(), frame.height()),
            (0, 0, 1920, 1080)
        );
        // the restore geometry is untouched
        assert_eq!(frame.state.geometry, Rect::new(100, 100, 300, 200));
    }

    #[test]
    fn apply_state_shade_keeps_maximized_width() {
        let (mut frame, cfg, theme) = setup();
        let mut screens = Screens::single(1920, 1080);
        screens.heads[0].usable = Rect::new(0, 20, 1920, 1040);
        frame.state.maximized = Maximized::HORZ;
        frame.state.shaded = true;
        frame.apply_state(&cfg, &theme, &screens, &SizeHints::default());
        assert_eq!(frame.x(), 0);
        assert_eq!(frame.width(), 1920 - 2 * frame.border_width() as i32);
        assert_eq!(frame.height(), frame.titlebar.geometry.h);
        // the pre-maximize width and pre-shade height stay restorable
        assert_eq!(frame.state.geometry.w, 300);
        assert_eq!(frame.state.geometry.h, 200);
    }

    #[test]
    fn apply_state_maximize_vert_uses_usable_area() {
        let (mut frame, cfg, theme) = setup();
        let mut screens = Screens::single(1920, 1080);
        screens.heads[0].usable = Rect::new(0, 20, 1920, 1040);
        frame.state.maximized = Maximized::VERT;
        frame.apply_state(&cfg, &theme, &screens, &SizeHints::default());
        assert_eq!(frame.y(), 20);
        assert_eq!(frame.height(), 1040 - 2 * frame.border_width() as i32);
        // x/width untouched
        assert_eq!(frame.x(), 100);
    }

    #[test]
    fn apply_state_skips_increments_when_maximized() {
        let (mut frame, cfg, theme) = setup();
        let screens = Screens::single(1920, 1080);
        let hints = SizeHints {
            width_inc: 7,
            height_inc: 13,
            ..SizeHints::default()
        };
        frame.state.maximized = Maximized::FULL;
        frame.apply_state(&cfg, &theme, &screens, &hints);
        // cfg.max_ignore_increment is on; the size fills the screen
        assert_eq!(frame.width(), 1920 - 2 * frame.border_width() as i32);
        assert_eq!(frame.height(), 1080 - 2 * frame.border_width() as i32);
    }

    #[test]
    fn extents_notification_follows_commit() {
        let (mut frame, cfg, theme) = setup();
        let screens = Screens::single(1920, 1080);
        frame.state.maximized = Maximized::FULL;
        frame.apply_state(&cfg, &theme, &screens, &SizeHints::default());
        let mut saw_commit = false;
        for action in &frame.actions {
            match action {
                DisplayAction::MoveResizeWindow(h, ..) if *h == frame.window.handle => {
                    saw_commit = true;
                }
                DisplayAction::UpdateFrameExtents { .. } => {
                    assert!(saw_commit, "extents notified before geometry commit");
                }
                _ => {}
            }
        }
        assert!(saw_commit);
    }
}
