//! Geometry entry points the window-lifecycle layer calls directly.
use crate::config::{Config, ScreenMetrics, Theme};
use crate::display_action::DisplayAction;
use crate::models::{
    Gravity, Handle, ManagedWindow, Manager, Mode, ReferenceCorner, WindowHandle,
};

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    pub fn move_window(&mut self, handle: WindowHandle<H>, x: i32, y: i32) -> bool {
        let (w, h) = match self.state.window(handle) {
            Some(win) => (win.frame.width(), win.frame.height()),
            None => return false,
        };
        self.move_resize_window(handle, x, y, w, h)
    }

    pub fn resize_window(&mut self, handle: WindowHandle<H>, w: i32, h: i32) -> bool {
        let (x, y) = match self.state.window(handle) {
            Some(win) => (win.frame.x(), win.frame.y()),
            None => return false,
        };
        self.move_resize_window(handle, x, y, w, h)
    }

    /// Commit new frame geometry and tell the client where it ended up.
    /// A resize is refused while shaded; a move that would push the
    /// frame entirely off the top-left of the screen is clamped.
    pub fn move_resize_window(
        &mut self,
        handle: WindowHandle<H>,
        mut x: i32,
        mut y: i32,
        w: i32,
        h: i32,
    ) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let in_drag = !state.mode.is_normal();
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };

        let mut moved = x != win.frame.x() || y != win.frame.y();
        if (w != win.frame.width() || h != win.frame.height()) && !win.frame.state.shaded {
            if win.frame.width() + x < 0 {
                x = 0;
            }
            if win.frame.height() + y < 0 {
                y = 0;
            }
            win.frame
                .move_resize(config, theme, x, y, w, h, true, true, false);
            moved = true;
        } else if moved {
            win.frame.move_to(config, theme, x, y);
        }

        if moved && !in_drag {
            send_configure_notify(win);
        }
        true
    }

    /// Place the frame so the client lands where it asked to, honoring
    /// the gravity and border width it requested. Unshades.
    #[allow(clippy::too_many_arguments)]
    pub fn move_resize_window_for_client(
        &mut self,
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        gravity: Gravity,
        client_bw: u32,
    ) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };
        win.frame
            .move_resize_for_client(config, theme, x, y, w, h, gravity, client_bw, true, true);
        win.frame.state.shaded = false;
        send_configure_notify(win);
        true
    }

    pub fn resize_window_for_client(
        &mut self,
        handle: WindowHandle<H>,
        w: i32,
        h: i32,
        gravity: Gravity,
        client_bw: u32,
    ) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };
        win.frame
            .resize_for_client(config, theme, w, h, gravity, client_bw);
        send_configure_notify(win);
        true
    }

    pub fn show_window(&mut self, handle: WindowHandle<H>) -> bool {
        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        win.frame.show();
        true
    }

    /// Hide a frame. A resize on it always stops; a move or tab drag
    /// stops only when `interrupt_moving` is set (workspace switches
    /// hide windows mid-drag without ending the drag).
    pub fn hide_window(&mut self, handle: WindowHandle<H>, interrupt_moving: bool) -> bool {
        if self.state.mode.dragged_window() == Some(handle) {
            match self.state.mode {
                Mode::Resizing(_) => {
                    self.stop_resizing(true);
                }
                Mode::Moving(_) if interrupt_moving => {
                    self.stop_moving(true);
                }
                Mode::Tabbing(_) if interrupt_moving => {
                    self.attach_to(0, 0, true);
                }
                _ => {}
            }
        }
        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        win.frame.hide();
        true
    }

    pub fn set_focus(&mut self, handle: WindowHandle<H>, focused: bool) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };
        win.frame.set_focus(config, theme, focused);
        true
    }

    /// Turn coordinates relative to a corner of the window's head into
    /// absolute ones.
    pub fn translate_coords(
        &self,
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
        corner: ReferenceCorner,
    ) -> Option<(i32, i32)> {
        let win = self.state.window(handle)?;
        let frame = &win.frame;
        let head = self
            .state
            .screens
            .head_at(frame.x() + frame.width() / 2, frame.y() + frame.height() / 2);
        let usable = self.state.screens.usable_rect(head);
        let bw = frame.border_width() as i32;
        Some((
            corner.translate_x(x, usable, frame.width(), bw),
            corner.translate_y(y, usable, frame.height(), bw),
        ))
    }
}

/// Tell the client its root-relative position; it only ever sees its
/// own little window inside the frame.
pub(super) fn send_configure_notify<H: Handle>(win: &mut ManagedWindow<H>) {
    let frame = &win.frame;
    let bw = frame.border_width() as i32;
    let x = frame.x() + frame.client_area.geometry.x + bw;
    let y = frame.y() + frame.client_area.geometry.y + bw;
    let w = frame.client_area.geometry.w as u32;
    let h = frame.client_area.geometry.h as u32;
    let border = frame.active_client_bw();
    win.frame.actions.push_back(DisplayAction::ConfigureNotify {
        window: win.handle,
        x,
        y,
        w,
        h,
        border,
    });
}
