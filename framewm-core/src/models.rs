//! Objects used to model frames and their manipulation.
mod frame;
mod geometry;
mod gravity;
mod manager;
mod mode;
mod screen;
mod size_hints;
mod tab;
mod window;
mod window_state;

pub use frame::Frame;
pub use geometry::Rect;
pub use gravity::Gravity;
pub use manager::Manager;
pub use mode::{DragSession, Mode, ReferenceCorner};
pub use screen::{Screen, Screens};
pub use size_hints::SizeHints;
pub use tab::{Alignment, Orientation, TabMode, TabPlacement, TabStrip, TabStripParent};
pub use window::Handle;
pub use window::ManagedWindow;
pub use window::WindowHandle;
#[cfg(test)]
pub(crate) use frame::test_support::mock_frame;
#[cfg(test)]
pub(crate) use window::MockHandle;
pub use window_state::{DecorMask, Maximized, WindowState};
