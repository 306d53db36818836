//! The composite frame around a client: outer container, titlebar,
//! label, tab strip, handle with grips, and the client area.
mod decorations;
mod tabs;

use std::collections::VecDeque;

use crate::config::{Config, Theme};
use crate::display_action::{Cursor, DisplayAction};
use crate::models::{
    Gravity, Handle, Rect, SizeHints, TabMode, TabStrip, WindowHandle, WindowState,
};
use serde::{Deserialize, Serialize};

const GRIP_WIDTH: i32 = 20;

/// One native sub-window of the frame. Geometry is parent-relative for
/// everything but the outer window, whose geometry is root-relative and
/// excludes its border.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subwin<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub geometry: Rect,
    pub visible: bool,
}

impl<H: Handle> Subwin<H> {
    fn new(handle: WindowHandle<H>, geometry: Rect) -> Self {
        Self {
            handle,
            geometry,
            visible: false,
        }
    }
}

/// The native windows a display server allocated for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameHandles<H: Handle> {
    pub window: WindowHandle<H>,
    pub titlebar: WindowHandle<H>,
    pub label: WindowHandle<H>,
    pub handle_bar: WindowHandle<H>,
    pub grip_left: WindowHandle<H>,
    pub grip_right: WindowHandle<H>,
    pub client_area: WindowHandle<H>,
    pub tab_strip: WindowHandle<H>,
}

/// Frame bookkeeping and geometry. All effects on native windows are
/// queued as [`DisplayAction`]s in `actions`; the display server drains
/// them after each operation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Frame<H: Handle> {
    pub state: WindowState,
    #[serde(bound = "")]
    pub window: Subwin<H>,
    #[serde(bound = "")]
    pub titlebar: Subwin<H>,
    #[serde(bound = "")]
    pub label: Subwin<H>,
    #[serde(bound = "")]
    pub handle_bar: Subwin<H>,
    #[serde(bound = "")]
    pub grip_left: Subwin<H>,
    #[serde(bound = "")]
    pub grip_right: Subwin<H>,
    #[serde(bound = "")]
    pub client_area: Subwin<H>,
    #[serde(bound = "")]
    pub tabs: TabStrip<H>,
    bevel: u32,
    pub visible: bool,
    pub(crate) use_titlebar: bool,
    pub(crate) use_tabs: bool,
    pub(crate) use_handle: bool,
    tab_mode: TabMode,
    /// Border of the outer window; zero while the border decoration is
    /// disabled.
    border_width: u32,
    /// Border of the titlebar, handle, grips and external tab strip.
    deco_border_width: u32,
    border_color: u64,
    active_gravity: Gravity,
    active_client_bw: u32,
    #[serde(bound = "")]
    pub actions: VecDeque<DisplayAction<H>>,
}

impl<H: Handle> Frame<H> {
    pub fn new(handles: FrameHandles<H>, state: WindowState) -> Self {
        Self {
            state,
            window: Subwin::new(handles.window, state.geometry),
            titlebar: Subwin::new(handles.titlebar, Rect::new(0, 0, 100, 16)),
            label: Subwin::new(handles.label, Rect::new(0, 0, 100, 16)),
            handle_bar: Subwin::new(handles.handle_bar, Rect::new(0, 0, 100, 5)),
            grip_left: Subwin::new(handles.grip_left, Rect::new(0, 0, GRIP_WIDTH, 4)),
            grip_right: Subwin::new(handles.grip_right, Rect::new(0, 0, GRIP_WIDTH, 4)),
            client_area: Subwin::new(handles.client_area, Rect::new(0, 0, 100, 100)),
            tabs: TabStrip::new(handles.tab_strip),
            bevel: 1,
            visible: false,
            use_titlebar: true,
            use_tabs: true,
            use_handle: true,
            tab_mode: TabMode::Internal,
            border_width: 0,
            deco_border_width: 0,
            border_color: 0,
            active_gravity: Gravity::NorthWest,
            active_client_bw: 0,
            actions: VecDeque::new(),
        }
    }

    pub fn x(&self) -> i32 {
        self.window.geometry.x
    }

    pub fn y(&self) -> i32 {
        self.window.geometry.y
    }

    pub fn width(&self) -> i32 {
        self.window.geometry.w
    }

    pub fn height(&self) -> i32 {
        self.window.geometry.h
    }

    pub fn border_width(&self) -> u32 {
        self.border_width
    }

    pub fn tab_mode(&self) -> TabMode {
        self.tab_mode
    }

    pub fn bevel(&self) -> u32 {
        self.bevel
    }

    /// Vertical space the titlebar takes out of the frame, including
    /// the shared border below it. Zero when hidden.
    pub fn titlebar_height(&self) -> u32 {
        if self.use_titlebar {
            self.titlebar.geometry.h as u32 + self.deco_border_width
        } else {
            0
        }
    }

    /// Vertical space the handle takes out of the frame. Zero when
    /// hidden.
    pub fn handle_height(&self) -> u32 {
        if self.use_handle {
            self.handle_bar.geometry.h as u32 + self.deco_border_width
        } else {
            0
        }
    }

    /// Tab height minus the shared bevel on each side.
    pub fn button_height(&self) -> u32 {
        (self.titlebar.geometry.h as u32).saturating_sub(self.bevel * 2)
    }

    pub fn set_active_gravity(&mut self, gravity: Gravity, client_bw: u32) {
        self.active_gravity = gravity;
        self.active_client_bw = client_bw;
    }

    pub fn active_gravity(&self) -> Gravity {
        self.active_gravity
    }

    pub fn active_client_bw(&self) -> u32 {
        self.active_client_bw
    }

    /// Translate between client space and frame space for the client's
    /// requested gravity.
    pub fn gravity_translate(&self, x: i32, y: i32, invert: bool) -> (i32, i32) {
        self.active_gravity.translate(
            x,
            y,
            self.active_client_bw,
            self.border_width,
            self.titlebar_height(),
            self.handle_height(),
            invert,
        )
    }

    pub fn move_to(&mut self, cfg: &impl Config, theme: &impl Theme, x: i32, y: i32) {
        self.move_resize(cfg, theme, x, y, 0, 0, true, false, false);
    }

    pub fn resize(&mut self, cfg: &impl Config, theme: &impl Theme, w: i32, h: i32) {
        self.move_resize(cfg, theme, 0, 0, w, h, false, true, false);
    }

    /// Commit new frame geometry. Axes that are unchanged are elided
    /// unless `force` is set; geometry is persisted into the window
    /// state before any action a listener could observe is queued.
    #[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
    pub fn move_resize(
        &mut self,
        cfg: &impl Config,
        theme: &impl Theme,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        mut do_move: bool,
        mut do_resize: bool,
        force: bool,
    ) {
        if !force && do_move && x == self.x() && y == self.y() {
            do_move = false;
        }
        if !force && do_resize && w == self.width() && h == self.height() {
            do_resize = false;
        }
        if !do_move && !do_resize {
            return;
        }

        if do_move && do_resize {
            self.window.geometry = Rect::new(x, y, w, h);
        } else if do_move {
            self.window.geometry.x = x;
            self.window.geometry.y = y;
        } else {
            self.window.geometry.w = w;
            self.window.geometry.h = h;
        }

        self.state.save_geometry(self.x(), self.y(), self.width(), self.height());

        let g = self.window.geometry;
        if do_move && do_resize {
            self.actions.push_back(DisplayAction::MoveResizeWindow(
                self.window.handle,
                g.x,
                g.y,
                g.w as u32,
                g.h as u32,
            ));
        } else if do_move {
            self.actions
                .push_back(DisplayAction::MoveWindow(self.window.handle, g.x, g.y));
        } else {
            self.actions.push_back(DisplayAction::ResizeWindow(
                self.window.handle,
                g.w as u32,
                g.h as u32,
            ));
        }

        // non-corner placements depend on the frame center, which
        // shifts on resize
        let placement = cfg.tab_placement();
        if do_move
            || (do_resize
                && placement != crate::models::TabPlacement::TopLeft
                && placement != crate::models::TabPlacement::LeftTop)
        {
            self.align_tabs(cfg);
        }

        if do_resize {
            if self.tab_mode == TabMode::External {
                let s = if placement.is_horizontal() { g.w } else { g.h };
                self.tabs.max_total_size = s.max(1) as u32;
            }
            self.reconfigure(cfg, theme);
        }
    }

    /// Same persistence and tab bookkeeping as [`Self::move_resize`]
    /// but no layout pass, for the hot path of an opaque drag.
    pub fn quiet_move_resize(&mut self, cfg: &impl Config, x: i32, y: i32, w: i32, h: i32) {
        self.window.geometry = Rect::new(x, y, w, h);
        self.state.save_geometry(x, y, w, h);
        self.actions.push_back(DisplayAction::MoveResizeWindow(
            self.window.handle,
            x,
            y,
            w as u32,
            h as u32,
        ));
        if self.tab_mode == TabMode::External {
            let s = if cfg.tab_placement().is_horizontal() { w } else { h };
            self.tabs.max_total_size = s.max(1) as u32;
            self.align_tabs(cfg);
        }
    }

    /// Position the frame so the client lands where it asked to be,
    /// honoring its gravity. `h` is the client height when resizing;
    /// decoration overhead is added here.
    #[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
    pub fn move_resize_for_client(
        &mut self,
        cfg: &impl Config,
        theme: &impl Theme,
        x: i32,
        y: i32,
        w: i32,
        mut h: i32,
        gravity: Gravity,
        client_bw: u32,
        do_move: bool,
        do_resize: bool,
    ) {
        if do_resize {
            h += (self.titlebar_height() + self.handle_height()) as i32;
        }
        self.set_active_gravity(gravity, client_bw);
        let (x, y) = self.gravity_translate(x, y, false);
        self.move_resize(cfg, theme, x, y, w, h, do_move, do_resize, false);
    }

    pub fn resize_for_client(
        &mut self,
        cfg: &impl Config,
        theme: &impl Theme,
        w: i32,
        h: i32,
        gravity: Gravity,
        client_bw: u32,
    ) {
        self.move_resize_for_client(cfg, theme, 0, 0, w, h, gravity, client_bw, false, true);
    }

    /// Clamp a requested client size to the hints, keeping the frame's
    /// decoration overhead out of the increment math.
    pub fn apply_size_hints(&self, hints: &SizeHints, w: u32, h: u32) -> (u32, u32) {
        let overhead = self.titlebar_height() + self.handle_height();
        let client_h = (h as i32 - overhead as i32).max(overhead as i32) as u32;
        let (w, client_h) = hints.apply(w, client_h);
        (w, client_h + overhead)
    }

    pub fn show(&mut self) {
        self.visible = true;
        if self.tab_mode == TabMode::External && self.use_tabs {
            self.tabs.visible = true;
            self.actions
                .push_back(DisplayAction::ShowWindow(self.tabs.handle));
        }
        self.window.visible = true;
        self.actions
            .push_back(DisplayAction::ShowWindow(self.window.handle));
    }

    pub fn hide(&mut self) {
        self.window.visible = false;
        self.actions
            .push_back(DisplayAction::HideWindow(self.window.handle));
        if self.tab_mode == TabMode::External && self.use_tabs {
            self.tabs.visible = false;
            self.actions
                .push_back(DisplayAction::HideWindow(self.tabs.handle));
        }
        self.visible = false;
    }

    pub fn set_focus(&mut self, cfg: &impl Config, theme: &impl Theme, focused: bool) {
        if self.state.focused == focused {
            return;
        }
        self.state.focused = focused;
        let alpha = theme.alpha(focused);
        self.actions
            .push_back(DisplayAction::SetWindowAlpha(self.window.handle, alpha));
        if self.tab_mode == TabMode::External {
            self.actions
                .push_back(DisplayAction::SetWindowAlpha(self.tabs.handle, alpha));
        }
        self.set_border_width(cfg, theme, false);
    }

    /// Cursors for the parts the pointer interacts with: the grips get
    /// their resize cursors, the rest of the frame the plain arrow.
    pub fn assign_cursors(&mut self) {
        for (handle, cursor) in [
            (self.window.handle, Cursor::Default),
            (self.grip_left.handle, Cursor::ResizeBottomLeft),
            (self.grip_right.handle, Cursor::ResizeBottomRight),
        ] {
            self.actions
                .push_back(DisplayAction::SetCursor(handle, cursor));
        }
    }

    /// Decoration space around the client on each side, for the
    /// extents-changed notification.
    pub fn extents(&self, cfg: &impl Config) -> (u32, u32, u32, u32) {
        let bw = self.border_width;
        let left = bw + self.x_offset(cfg) as u32;
        let right = bw + (self.width_offset(cfg) - self.x_offset(cfg)) as u32;
        let top = bw + self.titlebar_height() + self.y_offset(cfg) as u32;
        let bottom = bw + self.handle_height() + (self.height_offset(cfg) - self.y_offset(cfg)) as u32;
        (left, right, top, bottom)
    }

    pub(crate) fn notify_extents_changed(&mut self, cfg: &impl Config) {
        let (left, right, top, bottom) = self.extents(cfg);
        self.actions.push_back(DisplayAction::UpdateFrameExtents {
            window: self.window.handle,
            left,
            right,
            top,
            bottom,
        });
    }

    /// Extra width an external left/right tab strip adds to the frame's
    /// footprint.
    pub fn width_offset(&self, cfg: &impl Config) -> i32 {
        if self.tab_mode != TabMode::External || !self.use_tabs {
            return 0;
        }
        if cfg.tab_placement().is_horizontal() {
            return 0;
        }
        self.tabs.geometry.w + self.border_width as i32
    }

    pub fn height_offset(&self, cfg: &impl Config) -> i32 {
        if self.tab_mode != TabMode::External || !self.use_tabs {
            return 0;
        }
        if !cfg.tab_placement().is_horizontal() {
            return 0;
        }
        self.tabs.geometry.h + self.border_width as i32
    }

    /// How far the frame's footprint extends left of its x position.
    pub fn x_offset(&self, cfg: &impl Config) -> i32 {
        use crate::models::TabPlacement as P;
        if self.tab_mode != TabMode::External || !self.use_tabs {
            return 0;
        }
        match cfg.tab_placement() {
            P::LeftTop | P::Left | P::LeftBottom => self.tabs.geometry.w + self.border_width as i32,
            _ => 0,
        }
    }

    pub fn y_offset(&self, cfg: &impl Config) -> i32 {
        use crate::models::TabPlacement as P;
        if self.tab_mode != TabMode::External || !self.use_tabs {
            return 0;
        }
        match cfg.tab_placement() {
            P::TopLeft | P::Top | P::TopRight => self.tabs.geometry.h + self.border_width as i32,
            _ => 0,
        }
    }

    /// Re-derive the whole sub-window layout after a size, decoration
    /// or theme change.
    pub fn reconfigure(&mut self, cfg: &impl Config, theme: &impl Theme) {
        if self.tabs.is_empty() {
            return;
        }

        // decoration changes below must not move the client's gravity
        // reference point
        let (gx, gy) = self.gravity_translate(0, 0, true);

        self.bevel = theme.bevel_width();

        let orig_handle_h = self.handle_bar.geometry.h;
        if self.use_handle && orig_handle_h != theme.handle_height() as i32 {
            let h = self.height() - orig_handle_h + theme.handle_height() as i32;
            self.set_size_raw(self.width(), h);
        }
        self.handle_bar.geometry.h = theme.handle_height() as i32;

        if self.use_titlebar {
            self.reconfigure_titlebar(theme);
        }

        if self.tab_mode == TabMode::External {
            self.tabs.relayout(self.button_height());
            self.align_tabs(cfg);
        }

        // leave client and grips alone while shaded; they get fixed on
        // unshade
        if !self.state.shaded || self.state.fullscreen {
            let mut client_top = 0;
            let mut client_height = self.height();
            if self.use_titlebar {
                // only one borderwidth as the titlebar is really at
                // -borderwidth
                let titlebar_height = self.titlebar.geometry.h + self.deco_border_width as i32;
                client_top += titlebar_height;
                client_height -= titlebar_height;
            }

            let grip_height = self.handle_bar.geometry.h;
            let handle_bw = self.deco_border_width as i32;

            let mut ypos = self.height();
            // if the handle isn't on, it sits just below the window
            if self.use_handle {
                ypos -= grip_height + handle_bw;
            }

            Self::layout(
                &mut self.actions,
                &mut self.handle_bar,
                Rect::new(-handle_bw, ypos, self.window.geometry.w, grip_height),
            );
            Self::layout(
                &mut self.actions,
                &mut self.grip_left,
                Rect::new(-handle_bw, -handle_bw, GRIP_WIDTH, grip_height),
            );
            Self::layout(
                &mut self.actions,
                &mut self.grip_right,
                Rect::new(
                    self.handle_bar.geometry.w - GRIP_WIDTH - handle_bw,
                    -handle_bw,
                    GRIP_WIDTH,
                    grip_height,
                ),
            );

            if self.use_handle {
                client_height -= self.handle_bar.geometry.h + handle_bw;
            }

            Self::layout(
                &mut self.actions,
                &mut self.client_area,
                Rect::new(0, client_top, self.window.geometry.w, client_height.max(1)),
            );
        }

        let (gx, gy) = self.gravity_translate(gx, gy, false);
        if gx != 0 || gy != 0 {
            self.move_to(cfg, theme, gx + self.x(), gy + self.y());
        }
    }

    fn reconfigure_titlebar(&mut self, theme: &impl Theme) {
        if !self.use_titlebar {
            return;
        }

        let orig_height = self.titlebar.geometry.h;
        let title_height = theme.title_height().max(1) as i32;

        // if the titlebar grows, the whole window does too
        if orig_height != title_height {
            let h = self.height() - orig_height + title_height;
            self.set_size_raw(self.width(), h);
        }

        let tbw = self.deco_border_width as i32;
        Self::layout(
            &mut self.actions,
            &mut self.titlebar,
            Rect::new(-tbw, -tbw, self.window.geometry.w, title_height),
        );

        let bevel = self.bevel as i32;
        let button_size = self.button_height() as i32;
        let space_left = (self.titlebar.geometry.w - 2 * bevel).max(1);

        Self::layout(
            &mut self.actions,
            &mut self.label,
            Rect::new(bevel, bevel, space_left, button_size),
        );

        // internal tabs share the label's slot on the titlebar
        if self.tab_mode == TabMode::Internal {
            let rect = Rect::new(bevel, bevel, space_left, button_size);
            if self.tabs.geometry != rect {
                self.tabs.geometry = rect;
                self.actions.push_back(DisplayAction::MoveResizeWindow(
                    self.tabs.handle,
                    rect.x,
                    rect.y,
                    rect.w as u32,
                    rect.h as u32,
                ));
            }
        } else if self.use_tabs {
            self.tabs.relayout(button_size as u32);
        }
    }

    /// Resize without persisting or notifying, used while a decoration
    /// toggle is adjusting for its own extent.
    pub(crate) fn set_size_raw(&mut self, w: i32, h: i32) {
        let h = h.max(1);
        if w == self.window.geometry.w && h == self.window.geometry.h {
            return;
        }
        self.window.geometry.w = w;
        self.window.geometry.h = h;
        self.actions.push_back(DisplayAction::ResizeWindow(
            self.window.handle,
            w as u32,
            h as u32,
        ));
    }

    fn layout(
        actions: &mut VecDeque<DisplayAction<H>>,
        win: &mut Subwin<H>,
        rect: Rect,
    ) {
        if win.geometry == rect {
            return;
        }
        win.geometry = rect;
        actions.push_back(DisplayAction::MoveResizeWindow(
            win.handle,
            rect.x,
            rect.y,
            rect.w as u32,
            rect.h as u32,
        ));
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::mock_frame;
    use super::*;
    use crate::config::{TestConfig, TestTheme};
    use crate::models::TabPlacement;

    fn setup() -> (Frame<crate::models::MockHandle>, TestConfig, TestTheme) {
        let mut frame = mock_frame(Rect::new(100, 100, 300, 200));
        let cfg = TestConfig::default();
        let theme = TestTheme::default();
        frame.reconfigure(&cfg, &theme);
        frame.actions.clear();
        (frame, cfg, theme)
    }

    #[test]
    fn move_resize_noop_is_elided() {
        let (mut frame, cfg, theme) = setup();
        let (x, y, w, h) = (frame.x(), frame.y(), frame.width(), frame.height());
        frame.move_resize(&cfg, &theme, x, y, w, h, true, true, false);
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn move_resize_persists_before_actions() {
        let (mut frame, cfg, theme) = setup();
        frame.move_resize(&cfg, &theme, 10, 20, 400, 300, true, true, false);
        assert_eq!(frame.state.geometry, Rect::new(10, 20, 400, 300));
        assert!(matches!(
            frame.actions.front(),
            Some(DisplayAction::MoveResizeWindow(_, 10, 20, 400, 300))
        ));
    }

    #[test]
    fn pure_move_emits_move_only() {
        let (mut frame, cfg, theme) = setup();
        frame.move_resize(&cfg, &theme, 50, 60, frame.width(), frame.height(), true, true, false);
        assert!(matches!(
            frame.actions.front(),
            Some(DisplayAction::MoveWindow(_, 50, 60))
        ));
        assert!(!frame
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ResizeWindow(..))));
    }

    #[test]
    fn layout_invariant_holds() {
        let (frame, _cfg, _theme) = setup();
        let chrome = (frame.titlebar_height() + frame.handle_height()) as i32;
        assert_eq!(frame.height(), chrome + frame.client_area.geometry.h);
        assert_eq!(frame.client_area.geometry.y, frame.titlebar_height() as i32);
    }

    #[test]
    fn themed_relayout_keeps_the_frame_size() {
        let mut frame = mock_frame(Rect::new(100, 100, 300, 200));
        let cfg = TestConfig::default();
        let theme = TestTheme::default();
        frame.reconfigure(&cfg, &theme);
        frame.set_border_width(&cfg, &theme, false);
        assert_eq!(
            (frame.x(), frame.y(), frame.width(), frame.height()),
            (100, 100, 300, 200)
        );
    }

    #[test]
    fn focus_change_updates_the_frame_alpha() {
        let (mut frame, cfg, theme) = setup();
        frame.set_focus(&cfg, &theme, true);
        assert!(frame.actions.iter().any(|a| matches!(
            a,
            DisplayAction::SetWindowAlpha(h, 255) if *h == frame.window.handle
        )));
        frame.actions.clear();
        frame.set_focus(&cfg, &theme, false);
        assert!(frame
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::SetWindowAlpha(_, 200))));
        // unchanged focus stays quiet
        frame.actions.clear();
        frame.set_focus(&cfg, &theme, false);
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn size_hints_skip_decoration_overhead() {
        let (frame, _cfg, _theme) = setup();
        let hints = SizeHints {
            height_inc: 10,
            ..SizeHints::default()
        };
        let overhead = frame.titlebar_height() + frame.handle_height();
        let (_, h) = frame.apply_size_hints(&hints, 300, 95 + overhead);
        assert_eq!(h, 90 + overhead);
    }

    #[test]
    fn client_resize_accounts_for_decorations() {
        let (mut frame, cfg, theme) = setup();
        frame.resize_for_client(&cfg, &theme, 300, 150, Gravity::NorthWest, 0);
        let overhead = (frame.titlebar_height() + frame.handle_height()) as i32;
        assert_eq!(frame.height(), 150 + overhead);
    }

    #[test]
    fn external_tabs_align_above_frame() {
        let (mut frame, mut cfg, theme) = setup();
        cfg.internal_tabs = false;
        cfg.tab_placement = TabPlacement::Top;
        // five tabs of 64px capped by the 300px frame width
        for i in 0..4 {
            frame.tabs.insert(WindowHandle(60 + i));
        }
        frame.set_border_width(&cfg, &theme, false);
        frame.set_tab_mode(&cfg, TabMode::External);
        frame.align_tabs(&cfg);
        assert_eq!(frame.tabs.geometry.w, 300);
        assert_eq!(frame.tabs.geometry.x, 100);
        assert_eq!(frame.tabs.geometry.y, 79);
    }
}
