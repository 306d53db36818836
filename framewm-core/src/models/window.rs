//! Managed window information.
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;

use crate::models::{DecorMask, Frame, SizeHints};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Default + Send + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
#[cfg(test)]
pub type MockHandle = i32;
#[cfg(test)]
impl Handle for MockHandle {}

/// A client window together with the frame wrapping it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ManagedWindow<H: Handle> {
    /// The client (application) window.
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    #[serde(bound = "")]
    pub frame: Frame<H>,
    pub hints: SizeHints,
    /// Logical parent for transient (dialog) windows. Non-owning; the
    /// chain is resolved by bounded iteration, never followed blindly.
    #[serde(bound = "")]
    pub transient_for: Option<WindowHandle<H>>,
    pub workspace: usize,
    pub title: Option<String>,
    /// Set while the user has toggled all decorations away (or back on
    /// a bare window); client decoration requests are ignored until the
    /// toggle is undone.
    pub toggled_decos: bool,
    pub saved_deco_mask: DecorMask,
}

impl<H: Handle> ManagedWindow<H> {
    pub fn new(handle: WindowHandle<H>, frame: Frame<H>) -> Self {
        Self {
            handle,
            frame,
            hints: SizeHints::default(),
            transient_for: None,
            workspace: 0,
            title: None,
            toggled_decos: false,
            saved_deco_mask: DecorMask::NORMAL,
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.transient_for.is_some()
    }

    /// Visible on the given workspace, taking stickiness into account.
    #[must_use]
    pub fn on_workspace(&self, workspace: usize) -> bool {
        self.frame.state.stuck || self.workspace == workspace
    }
}
