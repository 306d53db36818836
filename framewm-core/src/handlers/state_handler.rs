//! Semantic state transitions: maximize, shade, stick, fullscreen,
//! stacking order, and head placement.
use crate::config::{Config, ScreenMetrics, Theme};
use crate::models::{DecorMask, Handle, Manager, Maximized, Mode, WindowHandle};
use crate::state::State;

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    /// Re-derive the frame layout from the window's semantic state:
    /// maximized axes, fullscreen, and shade all funnel through here.
    pub fn apply_window_state(&mut self, handle: WindowHandle<H>) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let State {
            windows, screens, ..
        } = state;
        let Some(win) = windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };
        win.frame.apply_state(config, theme, screens, &win.hints);
        true
    }

    /// Toggle toward `request`: a full request flips between full and
    /// none, a single axis flips just that axis.
    pub fn maximize(&mut self, handle: WindowHandle<H>, request: Maximized) -> bool {
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        let target = win.frame.state.maximized.toggled(request);
        self.set_maximized_state(handle, target)
    }

    pub fn set_maximized_state(&mut self, handle: WindowHandle<H>, target: Maximized) -> bool {
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        if win.frame.state.maximized == target {
            return true;
        }

        if matches!(&self.state.mode, Mode::Resizing(s) if s.handle == handle) {
            self.stop_resizing(false);
        }

        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        // unshade without a separate relayout; one apply covers both
        win.frame.state.shaded = false;
        win.frame.state.maximized = target;
        self.apply_window_state(handle)
    }

    /// Drop out of maximization keeping the current geometry as the
    /// restore target, the way a drag or resize on a maximized window
    /// demotes it in place.
    pub fn disable_maximization(&mut self, handle: WindowHandle<H>) {
        let Some(win) = self.state.window_mut(handle) else {
            return;
        };
        if win.frame.state.maximized.is_empty() && !win.frame.state.fullscreen {
            return;
        }
        win.frame.state.maximized = Maximized::empty();
        let (x, y, w, h) = (
            win.frame.x(),
            win.frame.y(),
            win.frame.width(),
            win.frame.height(),
        );
        win.frame.state.save_geometry(x, y, w, h);
        self.apply_window_state(handle);
    }

    /// Roll the titlebar up or down. Windows without a titlebar cannot
    /// shade.
    pub fn toggle_shade(&mut self, handle: WindowHandle<H>) -> bool {
        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        if !win.frame.state.effective_mask().contains(DecorMask::TITLEBAR) {
            return false;
        }
        win.frame.state.shaded = !win.frame.state.shaded;
        self.apply_window_state(handle)
    }

    pub fn set_shaded(&mut self, handle: WindowHandle<H>, shaded: bool) -> bool {
        match self.state.window(handle) {
            Some(win) if win.frame.state.shaded != shaded => self.toggle_shade(handle),
            Some(_) => true,
            None => false,
        }
    }

    /// Toggle stickiness; transients follow their root.
    pub fn toggle_stick(&mut self, handle: WindowHandle<H>) -> bool {
        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        let stuck = !win.frame.state.stuck;
        win.frame.state.stuck = stuck;
        for child in self.state.transient_children(handle) {
            if let Some(child_win) = self.state.window_mut(child) {
                child_win.frame.state.stuck = stuck;
            }
        }
        true
    }

    pub fn set_stuck(&mut self, handle: WindowHandle<H>, stuck: bool) -> bool {
        match self.state.window(handle) {
            Some(win) if win.frame.state.stuck != stuck => self.toggle_stick(handle),
            Some(_) => true,
            None => false,
        }
    }

    /// Fullscreen covers the whole head, bare of any decoration; on the
    /// way in the window also goes to the top of the stack.
    pub fn set_fullscreen(&mut self, handle: WindowHandle<H>, fullscreen: bool) -> bool {
        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        if win.frame.state.fullscreen == fullscreen {
            return true;
        }
        win.frame.state.fullscreen = fullscreen;
        self.apply_window_state(handle);
        if fullscreen {
            self.raise_window(handle);
        }
        true
    }

    /// Raise a window's transient group, the root below its transients.
    pub fn raise_window(&mut self, handle: WindowHandle<H>) -> bool {
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        if win.frame.state.iconic {
            return false;
        }
        let root = self.state.transient_root(handle).unwrap_or(handle);
        let children = self.state.transient_children(root);

        let state = &mut self.state;
        state.stacking.lock();
        state.stacking.raise(root, &mut state.actions);
        for child in children {
            state.stacking.raise(child, &mut state.actions);
        }
        state.stacking.unlock(&mut state.actions);
        true
    }

    /// Lower a window's transient group; the transients stay just above
    /// their root at the bottom.
    pub fn lower_window(&mut self, handle: WindowHandle<H>) -> bool {
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        if win.frame.state.iconic {
            return false;
        }
        let root = self.state.transient_root(handle).unwrap_or(handle);
        let children = self.state.transient_children(root);

        let state = &mut self.state;
        state.stacking.lock();
        for child in children {
            state.stacking.lower(child, &mut state.actions);
        }
        state.stacking.lower(root, &mut state.actions);
        state.stacking.unlock(&mut state.actions);
        true
    }

    /// Move a window to another head, preserving its alignment: a frame
    /// flush against its head's right or bottom edge stays flush, any
    /// other position maps proportionally.
    pub fn set_on_head(&mut self, handle: WindowHandle<H>, head: usize) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let State {
            windows, screens, ..
        } = state;
        if head >= screens.head_count() {
            return false;
        }
        let Some(win) = windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };
        let frame = &win.frame;
        let cur = screens.head_at(
            frame.x() + frame.width() / 2,
            frame.y() + frame.height() / 2,
        );
        let s = screens.head_rect(cur);
        let t = screens.head_rect(head);
        let (w, h, bw) = (frame.width(), frame.height(), frame.border_width() as i32);
        let mut x = frame.x();
        let mut y = frame.y();

        let d = s.x + s.w - (x + bw + w);
        if (s.x - x).abs() > bw && d.abs() <= bw {
            x = t.x + t.w - (w + bw + d);
        } else {
            x = t.w * (x - s.x) / s.w + t.x;
        }
        let d = s.y + s.h - (y + bw + h);
        if (s.y - y).abs() > bw && d.abs() <= bw {
            y = t.y + t.h - (h + bw + d);
        } else {
            y = t.h * (y - s.y) / s.h + t.y;
        }
        win.frame.move_to(config, theme, x, y);

        let reapply = !win.frame.state.maximized.is_empty() || win.frame.state.fullscreen;
        if reapply {
            self.apply_window_state(handle);
        }
        true
    }
}
