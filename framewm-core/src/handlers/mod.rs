mod decoration_handler;
mod move_handler;
mod resize_handler;
mod state_handler;
mod tab_drag_handler;
mod window_handler;

use crate::config::{Config, Theme};
use crate::models::{Handle, Manager, Mode, WindowHandle};

impl<H: Handle, C: Config, T: Theme> Manager<H, C, T> {
    /// Route a pointer motion to whatever drag is active. `over` is the
    /// managed window currently under the pointer, when known.
    pub fn pointer_motion(&mut self, x: i32, y: i32, over: Option<WindowHandle<H>>) {
        match self.state.mode {
            Mode::Moving(_) => self.move_motion(x, y),
            Mode::Resizing(_) => self.resize_motion(x, y),
            Mode::Tabbing(_) => self.tab_drag_motion(x, y, over),
            Mode::Normal => {}
        }
    }
}
