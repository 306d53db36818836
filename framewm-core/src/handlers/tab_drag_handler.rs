//! Dragging a tab: rubber-band the tab around, then attach it to
//! another frame, reorder it, or tear it off, depending on the drop.
use super::move_handler::warp_check;
use crate::config::{AttachArea, Config, Theme};
use crate::display_action::{Cursor, DisplayAction};
use crate::models::{
    DragSession, Frame, Handle, Manager, Mode, Orientation, Rect, TabStripParent, WindowHandle,
};

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    /// Begin dragging `client`'s tab out of `handle`'s strip. `x`/`y`
    /// are the absolute pointer position.
    pub fn start_tabbing(
        &mut self,
        handle: WindowHandle<H>,
        client: WindowHandle<H>,
        x: i32,
        y: i32,
    ) -> bool {
        if !self.state.mode.is_normal() || self.state.grabs > 0 {
            return false;
        }
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        let Some(idx) = win.frame.tabs.find(client) else {
            return false;
        };

        let (tab_x, tab_y, tab_w, tab_h) = tab_rect(&win.frame, idx);
        let mut session =
            DragSession::new(handle, x - tab_x, y - tab_y, Rect::new(tab_x, tab_y, tab_w, tab_h));
        session.pointer_x = x;
        session.pointer_y = y;
        session.origin_workspace = win.workspace;
        session.tab = Some(client);

        self.state.grabs += 1;
        self.state
            .actions
            .push_back(DisplayAction::GrabPointer(Cursor::Move));

        // tab drags always rubber-band; there is no opaque variant
        let outline = session.last;
        session.outline = Some(outline);
        self.state
            .actions
            .push_back(DisplayAction::DrawOutline(outline));

        self.state.mode = Mode::Tabbing(session);
        true
    }

    pub fn tab_drag_motion(&mut self, x: i32, y: i32, over: Option<WindowHandle<H>>) {
        let Mode::Tabbing(mut session) = self.state.mode.clone() else {
            return;
        };
        let moved_x = x - session.pointer_x;
        let moved_y = y - session.pointer_y;
        session.pointer_x = x;
        session.pointer_y = y;

        // the dragged window always follows a warp so the drop can
        // still land on it
        warp_check(&mut self.state, &self.config, &mut session, moved_x, moved_y, true);

        session.last.x = session.pointer_x - session.grab_x;
        session.last.y = session.pointer_y - session.grab_y;
        let outline = session.last;
        self.state.actions.push_back(DisplayAction::ClearOutline);
        self.state
            .actions
            .push_back(DisplayAction::DrawOutline(outline));
        session.outline = Some(outline);
        session.attach_target = over;

        self.state.mode = Mode::Tabbing(session);
    }

    /// Drop the dragged tab at `x`/`y`. Over another frame it attaches
    /// there; over its own titlebar it reorders; anywhere else it tears
    /// off into a window of its own at the rubber-band position.
    pub fn attach_to(&mut self, x: i32, y: i32, interrupted: bool) -> bool {
        let Mode::Tabbing(session) = self.state.mode.clone() else {
            return false;
        };
        self.state.mode = Mode::Normal;
        self.state.grabs = self.state.grabs.saturating_sub(1);
        self.state.actions.push_back(DisplayAction::ClearOutline);
        self.state.actions.push_back(DisplayAction::UngrabPointer);

        if interrupted {
            return true;
        }
        let Some(client) = session.tab else {
            return true;
        };
        let source = session.handle;

        let mut target = None;
        let mut inside_titlebar = false;
        if let Some(over) = session.attach_target {
            if let Some(tw) = self.state.window(over) {
                inside_titlebar = tw.frame.use_titlebar
                    && tw.frame.y() + tw.frame.titlebar_height() as i32 > y;
                target = match self.config.attach_area() {
                    AttachArea::Window => Some(over),
                    AttachArea::Titlebar if inside_titlebar => Some(over),
                    AttachArea::Titlebar => None,
                };
            }
        }

        match target {
            Some(t) if t != source => self.attach_client(source, t, client),
            Some(_) if inside_titlebar => self.move_client_to(source, client, x, y),
            _ => self.detach_client(source, client, &session),
        }
        true
    }

    /// Move `client` from one frame's strip into another's.
    fn attach_client(
        &mut self,
        source: WindowHandle<H>,
        target: WindowHandle<H>,
        client: WindowHandle<H>,
    ) {
        let Self {
            state,
            config,
            theme,
        } = self;
        if let Some(win) = state.windows.iter_mut().find(|w| w.handle == source) {
            if !win.frame.remove_tab(client) {
                return;
            }
            win.frame.refresh_tab_mode(config);
            win.frame.reconfigure(config, theme);
        }
        if let Some(win) = state.windows.iter_mut().find(|w| w.handle == target) {
            win.frame.add_tab(client);
            win.frame.refresh_tab_mode(config);
            win.frame.reconfigure(config, theme);
        }
    }

    /// Reorder a tab dropped back onto its own strip, landing left or
    /// right of whichever tab sits under the pointer.
    fn move_client_to(&mut self, handle: WindowHandle<H>, client: WindowHandle<H>, x: i32, y: i32) {
        let Self { state, config, .. } = self;
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == handle) else {
            return;
        };
        let n = win.frame.tabs.len() as i32;
        if n == 0 {
            return;
        }
        let (ox, oy) = strip_origin(&win.frame);
        let (rel, total) = if win.frame.tabs.orientation == Orientation::Rot0 {
            (x - ox, win.frame.tabs.geometry.w)
        } else {
            (y - oy, win.frame.tabs.geometry.h)
        };
        let item = (total / n).max(1);
        let idx = (rel / item).clamp(0, n - 1);
        let dest = win.frame.tabs.items[idx as usize];
        if dest == client {
            return;
        }
        if rel - idx * item < item / 2 {
            win.frame.move_tab_left_of(client, dest);
        } else {
            win.frame.move_tab_right_of(client, dest);
        }
        win.frame.align_tabs(config);
    }

    /// Tear a tab off into its own window at the rubber-band position.
    /// The dragged window returns to the workspace the drag began on.
    fn detach_client(
        &mut self,
        source: WindowHandle<H>,
        client: WindowHandle<H>,
        session: &DragSession<H>,
    ) {
        let Self {
            state,
            config,
            theme,
        } = self;
        let Some(win) = state.windows.iter_mut().find(|w| w.handle == source) else {
            return;
        };

        if win.workspace != session.origin_workspace {
            win.workspace = session.origin_workspace;
            win.frame.actions.push_back(DisplayAction::SetWindowWorkspace(
                win.handle,
                session.origin_workspace,
            ));
        }

        if win.frame.tabs.len() <= 1 {
            // nothing left to split off; the whole window just moves
            win.frame
                .move_to(config, theme, session.last.x, session.last.y);
            return;
        }

        win.frame.remove_tab(client);
        win.frame.refresh_tab_mode(config);
        win.frame.reconfigure(config, theme);
        win.frame.actions.push_back(DisplayAction::DetachClient {
            client,
            x: session.last.x,
            y: session.last.y,
        });
    }
}

/// Absolute top-left of the tab strip.
fn strip_origin<H: Handle>(frame: &Frame<H>) -> (i32, i32) {
    match frame.tabs.parent {
        TabStripParent::Root => (frame.tabs.geometry.x, frame.tabs.geometry.y),
        TabStripParent::Titlebar => (
            frame.x() + frame.titlebar.geometry.x + frame.tabs.geometry.x,
            frame.y() + frame.titlebar.geometry.y + frame.tabs.geometry.y,
        ),
    }
}

/// Absolute rectangle of the strip item at `idx`.
fn tab_rect<H: Handle>(frame: &Frame<H>, idx: usize) -> (i32, i32, i32, i32) {
    let n = frame.tabs.len().max(1) as i32;
    let (ox, oy) = strip_origin(frame);
    if frame.tabs.orientation == Orientation::Rot0 {
        let item = (frame.tabs.geometry.w / n).max(1);
        (ox + idx as i32 * item, oy, item, frame.tabs.geometry.h.max(1))
    } else {
        let item = (frame.tabs.geometry.h / n).max(1);
        (ox, oy + idx as i32 * item, frame.tabs.geometry.w.max(1), item)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_window, manager};
    use super::*;

    #[test]
    fn unknown_tab_refuses_to_drag() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(!m.start_tabbing(handle, WindowHandle(99), 150, 110));
    }

    #[test]
    fn lone_tab_drop_in_space_moves_the_window() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        let tab_x = {
            let win = m.state.window(handle).unwrap();
            tab_rect(&win.frame, 0).0
        };
        assert!(m.start_tabbing(handle, handle, 150, 110));
        m.tab_drag_motion(700, 500, None);
        assert!(m.attach_to(700, 500, false));
        let win = m.state.window(handle).unwrap();
        // the rubber band kept the grab offset into the tab
        assert_eq!(win.frame.x(), 700 - (150 - tab_x));
        assert!(m.state.mode.is_normal());
        assert_eq!(m.state.grabs, 0);
    }

    #[test]
    fn dropping_on_another_frame_attaches() {
        let mut m = manager();
        let a = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        let b = add_window(&mut m, 2, Rect::new(600, 100, 300, 200));
        assert!(m.start_tabbing(a, a, 150, 110));
        m.tab_drag_motion(700, 200, Some(b));
        assert!(m.attach_to(700, 200, false));
        assert!(m.state.window(a).unwrap().frame.tabs.is_empty());
        let target = m.state.window(b).unwrap();
        assert_eq!(target.frame.tabs.len(), 2);
        assert!(target.frame.tabs.find(a).is_some());
    }

    #[test]
    fn titlebar_attach_area_rejects_body_drops() {
        let mut m = manager();
        m.config.attach_area = AttachArea::Titlebar;
        let a = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        let b = add_window(&mut m, 2, Rect::new(600, 100, 300, 200));
        assert!(m.start_tabbing(a, a, 150, 110));
        // well below b's titlebar
        m.tab_drag_motion(700, 250, Some(b));
        m.attach_to(700, 250, false);
        assert_eq!(m.state.window(b).unwrap().frame.tabs.len(), 1);
        assert_eq!(m.state.window(a).unwrap().frame.tabs.len(), 1);
    }

    #[test]
    fn multi_tab_drop_in_space_tears_off() {
        let mut m = manager();
        let a = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        let extra = WindowHandle(60);
        {
            let win = m.state.window_mut(a).unwrap();
            win.frame.add_tab(extra);
        }
        assert!(m.start_tabbing(a, extra, 150, 110));
        m.tab_drag_motion(800, 600, None);
        m.attach_to(800, 600, false);
        let win = m.state.window(a).unwrap();
        assert_eq!(win.frame.tabs.items, vec![a]);
        assert!(win
            .frame
            .actions
            .iter()
            .any(|act| matches!(act, DisplayAction::DetachClient { client, .. } if *client == extra)));
    }

    #[test]
    fn reorder_lands_on_the_drop_half() {
        let mut m = manager();
        let a = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        let (t2, t3) = (WindowHandle(2), WindowHandle(3));
        {
            let win = m.state.window_mut(a).unwrap();
            win.frame.add_tab(t2);
            win.frame.add_tab(t3);
        }
        assert!(m.start_tabbing(a, a, 150, 110));
        let win = m.state.window(a).unwrap();
        let (ox, oy) = strip_origin(&win.frame);
        let item = (win.frame.tabs.geometry.w / 3).max(1);
        // right half of the third tab, inside the titlebar
        let drop_x = ox + 2 * item + item * 3 / 4;
        let drop_y = oy + 2;
        m.tab_drag_motion(drop_x, drop_y, Some(a));
        m.attach_to(drop_x, drop_y, false);
        assert_eq!(m.state.window(a).unwrap().frame.tabs.items, vec![t2, t3, a]);
    }

    #[test]
    fn warped_drag_restores_the_origin_workspace() {
        let mut m = manager();
        m.config.workspace_warping = true;
        let a = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(m.start_tabbing(a, a, 150, 110));
        m.tab_drag_motion(1919, 110, None);
        assert_eq!(m.state.window(a).unwrap().workspace, 1);
        m.attach_to(500, 300, false);
        assert_eq!(m.state.window(a).unwrap().workspace, 0);
    }
}
