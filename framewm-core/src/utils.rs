//! Snapping and stacking support for the handlers.
pub mod snap;
pub mod stacking;
