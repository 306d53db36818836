//! The frame engine of framewm: decoration geometry, window state
//! application, and interactive move/resize/tab-drag handling.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise. However, work to ensure that each use of one of these is correct
// would be very much appreciated.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access
)]
pub mod config;
mod display_action;
pub mod errors;
mod handlers;
pub mod models;
pub mod state;
pub mod utils;

pub use config::{AttachArea, Config, ResizeModel, ScreenMetrics, Theme};
pub use display_action::{Cursor, DisplayAction};
pub use models::{
    DecorMask, Frame, Gravity, Handle, ManagedWindow, Manager, Maximized, Mode, Rect,
    ReferenceCorner, TabMode, TabPlacement, WindowHandle,
};
pub use state::State;
