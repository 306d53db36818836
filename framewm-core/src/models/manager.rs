use crate::config::{Config, Theme};
use crate::errors::Result;
use crate::models::{Handle, ManagedWindow, Screens, WindowHandle};
use crate::state::State;

/// Maintains current engine state together with the configuration and
/// theme it is applied under.
#[derive(Debug)]
pub struct Manager<H: Handle, C, T> {
    pub state: State<H>,
    pub config: C,
    pub theme: T,
}

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    pub fn new(config: C, theme: T, screens: Screens, workspace_count: usize) -> Result<Self> {
        Ok(Self {
            state: State::new(screens, workspace_count)?,
            config,
            theme,
        })
    }

    /// Take over a window: decorate it per the mask it arrived with,
    /// lay the frame out, and put it on top of the stacking order.
    pub fn insert_window(&mut self, mut window: ManagedWindow<H>) {
        let Self {
            state,
            config,
            theme,
        } = self;
        if window.frame.tabs.is_empty() {
            window.frame.add_tab(window.handle);
        }
        window.workspace = state.current_workspace;
        window.frame.apply_decorations(config, theme, false);
        window.frame.reconfigure(config, theme);
        window.frame.assign_cursors();
        state.stacking.insert(window.handle, &mut state.actions);
        state.windows.push(window);
    }

    /// Drop a window from management. An active drag on it is
    /// interrupted first so the grab and outline are not leaked.
    pub fn remove_window(&mut self, handle: WindowHandle<H>) -> Option<ManagedWindow<H>> {
        if self.state.mode.dragged_window() == Some(handle) {
            self.stop_moving(true);
            self.stop_resizing(true);
            self.attach_to(0, 0, true);
        }
        let state = &mut self.state;
        state.stacking.remove(handle, &mut state.actions);
        let idx = state.windows.iter().position(|w| w.handle == handle)?;
        Some(state.windows.remove(idx))
    }
}

#[cfg(test)]
impl Manager<crate::models::MockHandle, crate::config::TestConfig, crate::config::TestTheme> {
    pub fn new_test() -> Self {
        Self::new(
            crate::config::TestConfig::default(),
            crate::config::TestTheme::default(),
            Screens::single(1920, 1080),
            4,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_action::{Cursor, DisplayAction};
    use crate::models::{mock_frame, Rect};

    #[test]
    fn managing_a_window_assigns_part_cursors() {
        let mut m = Manager::new_test();
        let handle = WindowHandle(1);
        m.insert_window(ManagedWindow::new(
            handle,
            mock_frame(Rect::new(0, 0, 300, 200)),
        ));
        let frame = &m.state.window(handle).unwrap().frame;
        assert!(frame.actions.iter().any(|a| matches!(
            a,
            DisplayAction::SetCursor(h, Cursor::ResizeBottomLeft) if *h == frame.grip_left.handle
        )));
        assert!(frame.actions.iter().any(|a| matches!(
            a,
            DisplayAction::SetCursor(h, Cursor::ResizeBottomRight) if *h == frame.grip_right.handle
        )));
        assert!(frame.actions.iter().any(|a| matches!(
            a,
            DisplayAction::SetCursor(h, Cursor::Default) if *h == frame.window.handle
        )));
    }
}
