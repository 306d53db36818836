//! The interactive move: grab, motion with snapping and workspace
//! warping, and the final commit.
use super::window_handler::send_configure_notify;
use crate::config::{Config, ScreenMetrics, Theme};
use crate::display_action::{Cursor, DisplayAction};
use crate::models::{DragSession, Handle, Manager, Mode, Rect, WindowHandle};
use crate::state::State;
use crate::utils::snap::do_snapping;

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    pub fn start_moving(&mut self, handle: WindowHandle<H>, x: i32, y: i32) -> bool {
        if !self.state.mode.is_normal() || self.state.grabs > 0 {
            return false;
        }
        let Some(win) = self.state.window(handle) else {
            return false;
        };
        let frame = &win.frame;
        if (frame.state.is_maximized() || frame.state.fullscreen) && self.config.max_disable_move()
        {
            return false;
        }

        let bw = frame.border_width() as i32;
        let base = Rect::new(frame.x(), frame.y(), frame.width(), frame.height());
        let mut session = DragSession::new(handle, x - frame.x() - bw, y - frame.y() - bw, base);
        session.pointer_x = x;
        session.pointer_y = y;
        session.origin_workspace = win.workspace;

        self.state.grabs += 1;
        self.state
            .actions
            .push_back(DisplayAction::GrabPointer(Cursor::Move));

        if !self.config.opaque_move() {
            let outline = Rect::new(base.x, base.y, base.w + 2 * bw, base.h + 2 * bw);
            session.outline = Some(outline);
            self.state
                .actions
                .push_back(DisplayAction::DrawOutline(outline));
        }

        self.state.mode = Mode::Moving(session);
        true
    }

    pub fn move_motion(&mut self, x: i32, y: i32) {
        let Mode::Moving(mut session) = self.state.mode.clone() else {
            return;
        };
        let moved_x = x - session.pointer_x;
        let moved_y = y - session.pointer_y;
        session.pointer_x = x;
        session.pointer_y = y;

        let follow = self.config.opaque_move();
        warp_check(
            &mut self.state,
            &self.config,
            &mut session,
            moved_x,
            moved_y,
            follow,
        );

        let Some(win) = self.state.window(session.handle) else {
            return;
        };
        let bw = win.frame.border_width() as i32;
        let (fw, fh) = (win.frame.width(), win.frame.height());

        let mut dx = session.pointer_x - session.grab_x - bw;
        let mut dy = session.pointer_y - session.grab_y - bw;
        do_snapping(
            &self.config,
            &self.state.screens,
            &self.state.windows,
            session.handle,
            self.state.current_workspace,
            &mut dx,
            &mut dy,
            false,
        );
        session.last.x = dx;
        session.last.y = dy;

        if self.config.opaque_move() {
            let Self { state, config, .. } = self;
            if let Some(win) = state.windows.iter_mut().find(|w| w.handle == session.handle) {
                win.frame.quiet_move_resize(config, dx, dy, fw, fh);
            }
        } else {
            let outline = Rect::new(dx, dy, fw + 2 * bw, fh + 2 * bw);
            self.state.actions.push_back(DisplayAction::ClearOutline);
            self.state
                .actions
                .push_back(DisplayAction::DrawOutline(outline));
            session.outline = Some(outline);
        }

        self.state.mode = Mode::Moving(session);
    }

    /// End the move. When `interrupted`, the final commit is skipped
    /// but the grab and any outline are still released.
    pub fn stop_moving(&mut self, interrupted: bool) -> bool {
        let Mode::Moving(session) = self.state.mode.clone() else {
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
            let workspace = state.current_workspace;
            if let Some(win) = state.windows.iter_mut().find(|w| w.handle == session.handle) {
                if config.opaque_move() {
                    // the frame is already there; force a commit so
                    // listeners hear about the final position
                    let (x, y) = (win.frame.x(), win.frame.y());
                    let (w, h) = (win.frame.width(), win.frame.height());
                    win.frame.move_resize(config, theme, x, y, w, h, true, true, true);
                } else {
                    let (w, h) = (win.frame.width(), win.frame.height());
                    win.frame.move_resize(
                        config,
                        theme,
                        session.last.x,
                        session.last.y,
                        w,
                        h,
                        true,
                        true,
                        false,
                    );
                    if win.workspace != workspace {
                        win.workspace = workspace;
                        win.frame
                            .actions
                            .push_back(DisplayAction::SetWindowWorkspace(win.handle, workspace));
                    }
                }
                send_configure_notify(win);
            }
        }

        // the drag may have crossed heads; maximized geometry follows
        let reapply = self
            .state
            .window(session.handle)
            .is_some_and(|w| w.frame.state.is_maximized() || w.frame.state.fullscreen);
        if reapply {
            self.apply_window_state(session.handle);
        }
        true
    }
}

/// Switch workspaces when a drag pushes the pointer into the warp zone
/// at a screen edge, wrapping modulo the workspace count. The pointer
/// is warped to the opposite edge so the drag continues seamlessly.
pub(super) fn warp_check<H: Handle>(
    state: &mut State<H>,
    config: &impl Config,
    session: &mut DragSession<H>,
    moved_x: i32,
    moved_y: i32,
    follow: bool,
) {
    if (moved_x == 0 && moved_y == 0) || !config.workspace_warping() {
        return;
    }
    let count = state.workspace_count as i32;
    let pad = config.edge_snap_threshold();
    let total_w = state.screens.total_width() as i32;
    let total_h = state.screens.total_height() as i32;
    let cur = state.current_workspace as i32;
    let mut new_id = cur;

    if moved_x != 0 && config.workspace_warping_horizontal() {
        let offset = config.workspace_warping_horizontal_offset();
        if session.pointer_x >= total_w - pad - 1 && moved_x > 0 {
            new_id = (cur + offset).rem_euclid(count);
            session.pointer_x = 0;
        } else if session.pointer_x <= pad && moved_x < 0 {
            new_id = (cur - offset).rem_euclid(count);
            session.pointer_x = total_w - 1;
        }
    }
    if moved_y != 0 && config.workspace_warping_vertical() {
        let offset = config.workspace_warping_vertical_offset();
        if session.pointer_y >= total_h - pad - 1 && moved_y > 0 {
            new_id = (cur + offset).rem_euclid(count);
            session.pointer_y = 0;
        } else if session.pointer_y <= pad && moved_y < 0 {
            new_id = (cur - offset).rem_euclid(count);
            session.pointer_y = total_h - 1;
        }
    }

    if new_id != cur {
        let new_id = new_id as usize;
        state
            .actions
            .push_back(DisplayAction::WarpPointer(session.pointer_x, session.pointer_y));
        state.current_workspace = new_id;
        state
            .actions
            .push_back(DisplayAction::SetCurrentWorkspace(new_id));
        if follow {
            if let Some(win) = state.windows.iter_mut().find(|w| w.handle == session.handle) {
                win.workspace = new_id;
            }
            state
                .actions
                .push_back(DisplayAction::SetWindowWorkspace(session.handle, new_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_window, manager};
    use super::*;
    use crate::models::Maximized;

    #[test]
    fn opaque_motion_moves_the_frame() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(m.start_moving(handle, 150, 150));
        m.move_motion(160, 170);
        let win = m.state.window(handle).unwrap();
        assert_eq!((win.frame.x(), win.frame.y()), (110, 120));
        m.stop_moving(false);
        assert!(m.state.mode.is_normal());
        assert_eq!(m.state.grabs, 0);
    }

    #[test]
    fn second_drag_is_refused_while_one_is_active() {
        let mut m = manager();
        let a = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        let b = add_window(&mut m, 2, Rect::new(600, 100, 300, 200));
        assert!(m.start_moving(a, 150, 150));
        assert!(!m.start_moving(b, 650, 150));
        assert!(!m.start_resizing(b, 10, 10, crate::models::ReferenceCorner::BottomRight));
    }

    #[test]
    fn external_grab_blocks_new_drags() {
        let mut m = manager();
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.state.grabs = 1;
        assert!(!m.start_moving(handle, 150, 150));
    }

    #[test]
    fn max_disable_move_pins_maximized_windows() {
        let mut m = manager();
        m.config.max_disable_move = true;
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.state.window_mut(handle).unwrap().frame.state.maximized = Maximized::FULL;
        assert!(!m.start_moving(handle, 150, 150));
    }

    #[test]
    fn motion_snaps_to_a_neighbor() {
        let mut m = manager();
        let a = add_window(&mut m, 1, Rect::new(500, 500, 300, 200));
        add_window(&mut m, 2, Rect::new(100, 450, 300, 200));
        let bw = m.state.window(a).unwrap().frame.border_width() as i32;
        let flush = 100 + 300 + 2 * bw;
        assert!(m.start_moving(a, 600, 600));
        // land 6px past the neighbor's bordered right edge
        m.move_motion(flush + 6 + 100, 600);
        let win = m.state.window(a).unwrap();
        assert_eq!(win.frame.x(), flush);
    }

    #[test]
    fn outline_move_defers_the_commit() {
        let mut m = manager();
        m.config.opaque_move = false;
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        assert!(m.start_moving(handle, 150, 150));
        assert!(m
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::DrawOutline(_))));
        m.move_motion(250, 150);
        // frame untouched while the rubber band moves
        assert_eq!(m.state.window(handle).unwrap().frame.x(), 100);
        m.stop_moving(false);
        assert_eq!(m.state.window(handle).unwrap().frame.x(), 200);
        assert!(m
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ClearOutline)));
    }

    #[test]
    fn interruption_releases_grab_and_outline() {
        let mut m = manager();
        m.config.opaque_move = false;
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.start_moving(handle, 150, 150);
        m.move_motion(400, 150);
        m.stop_moving(true);
        assert!(m.state.mode.is_normal());
        assert_eq!(m.state.grabs, 0);
        assert_eq!(m.state.window(handle).unwrap().frame.x(), 100);
        assert!(m
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ClearOutline)));
    }

    #[test]
    fn dragging_into_the_edge_warps_workspaces() {
        let mut m = manager();
        m.config.workspace_warping = true;
        let handle = add_window(&mut m, 1, Rect::new(100, 100, 300, 200));
        m.start_moving(handle, 150, 150);
        m.move_motion(1919, 150);
        assert_eq!(m.state.current_workspace, 1);
        assert_eq!(m.state.window(handle).unwrap().workspace, 1);
        assert!(m
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::WarpPointer(0, 150))));
        assert!(m
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::SetCurrentWorkspace(1))));
    }
}
