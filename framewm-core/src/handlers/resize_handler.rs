//! The interactive resize, anchored to whatever corner or edge the
//! grab landed on.
use super::window_handler::send_configure_notify;
use crate::config::{Config, Theme};
use crate::display_action::DisplayAction;
use crate::models::{
    DragSession, Handle, ManagedWindow, Manager, Mode, Rect, ReferenceCorner, WindowHandle,
};
use crate::utils::snap::do_snapping;

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    /// Map a frame-relative grab point to the resize direction the
    /// configured model assigns it.
    #[must_use]
    pub fn resize_direction(
        &self,
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
    ) -> Option<ReferenceCorner> {
        let win = self.state.window(handle)?;
        Some(ReferenceCorner::from_grab(
            x,
            y,
            win.frame.width(),
            win.frame.height(),
            self.config.resize_model(),
            self.config.corner_size_px(),
            self.config.corner_size_pc(),
        ))
    }

    /// Begin resizing. `x`/`y` are frame-relative. A maximized window
    /// drops out of its maximized state first; shaded and iconified
    /// windows cannot be resized at all.
    pub fn start_resizing(
        &mut self,
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
        corner: ReferenceCorner,
    ) -> bool {
        if !self.state.mode.is_normal() || self.state.grabs > 0 {
            return false;
        }
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        if win.frame.state.shaded || win.frame.state.iconic {
            return false;
        }
        if (win.frame.state.is_maximized() || win.frame.state.fullscreen)
            && self.config.max_disable_resize()
        {
            return false;
        }

        self.disable_maximization(handle);

        let Some(win) = self.state.window(handle) else {
            return false;
        };
        let frame = &win.frame;
        let bw = frame.border_width() as i32;
        let base = Rect::new(frame.x(), frame.y(), frame.width(), frame.height());
        let mut session = DragSession::new(handle, x + base.x, y + base.y, base);
        session.corner = corner;
        session.pointer_x = x + base.x;
        session.pointer_y = y + base.y;
        session.origin_workspace = win.workspace;
        let mut g = base;
        fix_size(win, &mut g, corner);
        session.last = g;

        self.state.grabs += 1;
        self.state
            .actions
            .push_back(DisplayAction::GrabPointer(corner.cursor()));

        if !self.config.opaque_resize() {
            let outline = Rect::new(g.x, g.y, g.w + 2 * bw, g.h + 2 * bw);
            session.outline = Some(outline);
            self.state
                .actions
                .push_back(DisplayAction::DrawOutline(outline));
        }

        self.state.mode = Mode::Resizing(session);
        true
    }

    pub fn resize_motion(&mut self, x: i32, y: i32) {
        let Mode::Resizing(mut session) = self.state.mode.clone() else {
            return;
        };
        session.pointer_x = x;
        session.pointer_y = y;

        let old = session.last;
        let base = session.base;
        let corner = session.corner;
        let dx = x - session.grab_x;
        let dy = y - session.grab_y;
        let mut g = old;

        use ReferenceCorner as Rc;
        if matches!(corner, Rc::TopLeft | Rc::Left | Rc::BottomLeft) {
            g.w = base.w - dx;
            g.x = base.x + dx;
        }
        if matches!(corner, Rc::TopLeft | Rc::TopRight | Rc::Top) {
            g.h = base.h - dy;
            g.y = base.y + dy;
        }
        if matches!(corner, Rc::BottomLeft | Rc::Bottom | Rc::BottomRight) {
            g.h = base.h + dy;
        }
        if matches!(corner, Rc::BottomRight | Rc::TopRight | Rc::Right) {
            g.w = base.w + dx;
        }
        if corner == Rc::Center && (dx.abs() >= 2 || dy.abs() >= 2) {
            // grow around the center, in even steps so it stays centered
            let diff = 2 * (dx.max(dy) / 2);
            g.w = base.w + diff;
            g.h = base.h + diff;
            g.x = base.x - diff / 2;
            g.y = base.y - diff / 2;
        }

        let Some(win) = self.state.window(session.handle) else {
            return;
        };
        fix_size(win, &mut g, corner);
        let bw = win.frame.border_width() as i32;

        if g != old {
            if self.config.edge_resize_snap_threshold() != 0 {
                self.snap_resized_corner(&session, &mut g, bw);
            }

            if g.w != old.w || g.h != old.h {
                if self.config.opaque_resize() {
                    let Self {
                        state,
                        config,
                        theme,
                    } = self;
                    if let Some(win) =
                        state.windows.iter_mut().find(|w| w.handle == session.handle)
                    {
                        win.frame
                            .move_resize(config, theme, g.x, g.y, g.w, g.h, true, true, false);
                    }
                } else {
                    let outline = Rect::new(g.x, g.y, g.w + 2 * bw, g.h + 2 * bw);
                    self.state.actions.push_back(DisplayAction::ClearOutline);
                    self.state
                        .actions
                        .push_back(DisplayAction::DrawOutline(outline));
                    session.outline = Some(outline);
                }
            }
        }

        session.last = g;
        self.state.mode = Mode::Resizing(session);
    }

    /// Snap the dragged corner against nearby edges, keeping the
    /// opposite corner fixed. The border width is folded into the
    /// far-side coordinates so bordered edges meet exactly.
    fn snap_resized_corner(&self, session: &DragSession<H>, g: &mut Rect, bw: i32) {
        let bw2 = 2 * bw;
        let botright_x = g.x + g.w;
        let botright_y = g.y + g.h;
        let snap = |tx: &mut i32, ty: &mut i32| {
            do_snapping(
                &self.config,
                &self.state.screens,
                &self.state.windows,
                session.handle,
                self.state.current_workspace,
                tx,
                ty,
                true,
            );
        };

        use ReferenceCorner as Rc;
        match session.corner {
            Rc::TopLeft => {
                let (mut tx, mut ty) = (g.x, g.y);
                snap(&mut tx, &mut ty);
                g.x = tx;
                g.y = ty;
                g.w = botright_x - g.x;
                g.h = botright_y - g.y;
            }
            Rc::BottomLeft => {
                let mut tx = g.x;
                let mut ty = g.y + g.h + bw2;
                snap(&mut tx, &mut ty);
                ty -= bw2;
                g.x = tx;
                g.h = ty - g.y;
                g.w = botright_x - g.x;
            }
            Rc::TopRight => {
                let mut tx = g.x + g.w + bw2;
                let mut ty = g.y;
                snap(&mut tx, &mut ty);
                tx -= bw2;
                g.w = tx - g.x;
                g.y = ty;
                g.h = botright_y - g.y;
            }
            Rc::BottomRight => {
                let mut tx = g.x + g.w + bw2;
                let mut ty = g.y + g.h + bw2;
                snap(&mut tx, &mut ty);
                tx -= bw2;
                ty -= bw2;
                g.w = tx - g.x;
                g.h = ty - g.y;
            }
            _ => {}
        }
    }

    pub fn stop_resizing(&mut self, interrupted: bool) -> bool {
        let Mode::Resizing(session) = self.state.mode.clone() else {
            return false;
        };
        self.state.mode = Mode::Normal;
        self.state.grabs = self.state.grabs.saturating_sub(1);
        self.state.actions.push_back(DisplayAction::UngrabPointer);
        if session.outline.is_some() {
            self.state.actions.push_back(DisplayAction::ClearOutline);
        }

        if !interrupted {
            let Self {
                state,
                config,
                theme,
            } = self;
            if let Some(win) = state.windows.iter_mut().find(|w| w.handle == session.handle) {
                let mut g = session.last;
                fix_size(win, &mut g, session.corner);
                win.frame
                    .move_resize(config, theme, g.x, g.y, g.w, g.h, true, true, true);
                send_configure_notify(win);
            }
        }
        true
    }
}

/// Clamp a pending resize to something the client will accept and
/// re-anchor so the corner opposite the drag stays put.
fn fix_size<H: Handle>(win: &ManagedWindow<H>, g: &mut Rect, corner: ReferenceCorner) {
    let w = if g.w > 0 { g.w as u32 } else { 1 };
    let h = if g.h > 0 { g.h as u32 } else { 1 };
    let (w, h) = win.frame.apply_size_hints(&win.hints, w, h);
    g.w = w as i32;
    g.h = h as i32;

    use ReferenceCorner as Rc;
    if matches!(corner, Rc::TopLeft | Rc::Left | Rc::BottomLeft) {
        g.x = win.frame.x() + win.frame.width() - g.w;
    }
    if matches!(corner, Rc::TopLeft | Rc::TopRight | Rc::Top) {
        g.y = win.frame.y() + win.frame.height() - g.h;
    }
}
