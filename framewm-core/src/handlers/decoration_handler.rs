//! Decoration-mask maintenance: client requests constrained by the
//! configured default, and the all-or-nothing user toggle.
use crate::config::{Config, Theme};
use crate::models::{DecorMask, Handle, Manager, WindowHandle};

/// The bits a client decoration request controls. Close, sticky, shade
/// and the enabled gate belong to the window manager alone.
const CLIENT_BITS: DecorMask = DecorMask::TITLEBAR
    .union(DecorMask::HANDLE)
    .union(DecorMask::BORDER)
    .union(DecorMask::ICONIFY)
    .union(DecorMask::MAXIMIZE)
    .union(DecorMask::MENU)
    .union(DecorMask::TAB);

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    /// Recompute the decoration mask from a client's request, `None`
    /// meaning the client asked for full decoration. The result is
    /// constrained by the configured default mask. Ignored while the
    /// user has the decoration toggle active.
    pub fn update_decorations(
        &mut self,
        handle: WindowHandle<H>,
        requested: Option<DecorMask>,
    ) -> bool {
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        if win.toggled_decos {
            return true;
        }

        let kept = win.frame.state.deco_mask - CLIENT_BITS;
        let mut mask = match requested {
            None => {
                kept | (win.frame.state.deco_mask & DecorMask::TAB)
                    | (CLIENT_BITS - DecorMask::TAB)
            }
            Some(req) => {
                let mut mask = kept | DecorMask::MENU;
                mask |= req
                    & (DecorMask::HANDLE
                        | DecorMask::BORDER
                        | DecorMask::ICONIFY
                        | DecorMask::MAXIMIZE
                        | DecorMask::MENU);
                // only tab windows with a titlebar
                if req.contains(DecorMask::TITLEBAR) {
                    mask |= DecorMask::TITLEBAR | DecorMask::TAB;
                }
                mask
            }
        };
        mask &= self.config.default_decorations();
        self.set_decoration_mask(handle, mask)
    }

    /// Replace the decoration mask wholesale and relayout the frame.
    pub fn set_decoration_mask(&mut self, handle: WindowHandle<H>, mask: DecorMask) -> bool {
        let Self {
            state,
            config,
            theme,
        } = self;
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == handle) else {
            return false;
        };
        if win.frame.state.deco_mask == mask {
            return true;
        }
        win.frame.state.deco_mask = mask;
        win.frame.apply_decorations(config, theme, true);
        true
    }

    /// Flip between the current chrome and a bare frame. The mask in
    /// effect before the first flip is restored by the second. Shaded
    /// and fullscreen windows keep their chrome.
    pub fn toggle_decorations(&mut self, handle: WindowHandle<H>) -> bool {
        let Some(win) = self.state.window_mut(handle) else {
            return false;
        };
        if win.frame.state.shaded || win.frame.state.fullscreen {
            return false;
        }
        win.toggled_decos = !win.toggled_decos;

        if win.toggled_decos {
            let cur = win.frame.state.deco_mask;
            win.saved_deco_mask = cur;
            let target = if cur.intersects(DecorMask::TITLEBAR | DecorMask::TAB) {
                DecorMask::empty()
            } else {
                DecorMask::NORMAL
            };
            self.set_decoration_mask(handle, target)
        } else {
            let saved = win.saved_deco_mask;
            self.set_decoration_mask(handle, saved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_window, manager};
    use super::*;
    use crate::models::Rect;

    #[test]
    fn toggle_strips_and_restores_the_chrome() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(m.toggle_decorations(handle));
        {
            let win = m.state.window(handle).unwrap();
            assert_eq!(win.frame.state.deco_mask, DecorMask::empty());
            assert!(!win.frame.use_titlebar);
            assert_eq!(win.frame.border_width(), 0);
        }
        assert!(m.toggle_decorations(handle));
        let win = m.state.window(handle).unwrap();
        assert_eq!(win.frame.state.deco_mask, DecorMask::NORMAL);
        assert!(win.frame.use_titlebar);
    }

    #[test]
    fn toggle_on_a_bare_window_dresses_it() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.set_decoration_mask(handle, DecorMask::ENABLED | DecorMask::BORDER);
        assert!(m.toggle_decorations(handle));
        assert_eq!(
            m.state.window(handle).unwrap().frame.state.deco_mask,
            DecorMask::NORMAL
        );
    }

    #[test]
    fn shaded_windows_keep_their_chrome() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(m.toggle_shade(handle));
        assert!(!m.toggle_decorations(handle));
        assert!(m.state.window(handle).unwrap().frame.use_titlebar);
    }

    #[test]
    fn client_request_without_titlebar_drops_tabs_too() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(m.update_decorations(handle, Some(DecorMask::BORDER | DecorMask::HANDLE)));
        let mask = m.state.window(handle).unwrap().frame.state.deco_mask;
        assert!(!mask.contains(DecorMask::TITLEBAR));
        assert!(!mask.contains(DecorMask::TAB));
        assert!(mask.contains(DecorMask::BORDER));
        // wm-owned bits survive the recompute
        assert!(mask.contains(DecorMask::ENABLED));
        assert!(mask.contains(DecorMask::CLOSE));
    }

    #[test]
    fn titlebar_request_carries_tabs_along() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.update_decorations(handle, Some(DecorMask::TITLEBAR));
        let mask = m.state.window(handle).unwrap().frame.state.deco_mask;
        assert!(mask.contains(DecorMask::TITLEBAR | DecorMask::TAB));
        assert!(!mask.contains(DecorMask::HANDLE));
    }

    #[test]
    fn configured_default_caps_the_request() {
        let mut m = manager();
        m.config.default_decorations = DecorMask::TOOL;
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.update_decorations(handle, None);
        let mask = m.state.window(handle).unwrap().frame.state.deco_mask;
        assert!(!mask.contains(DecorMask::HANDLE));
        assert!(!mask.contains(DecorMask::BORDER));
        assert!(mask.contains(DecorMask::TITLEBAR));
    }

    #[test]
    fn requests_are_ignored_while_toggled_bare() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.toggle_decorations(handle);
        assert!(m.update_decorations(handle, None));
        assert_eq!(
            m.state.window(handle).unwrap().frame.state.deco_mask,
            DecorMask::empty()
        );
    }
}
