//! The engine's shared state: managed windows, monitor layout, stacking
//! order, the live drag session, and the outgoing action queue.

use std::collections::VecDeque;

use crate::display_action::DisplayAction;
use crate::errors::{FrameError, Result};
use crate::models::{Handle, ManagedWindow, Mode, Screens, WindowHandle};
use crate::utils::stacking::LayerManager;
use serde::{Deserialize, Serialize};

/// Transient chains longer than this are treated as cyclic.
const MAX_TRANSIENT_DEPTH: usize = 64;

#[derive(Serialize, Deserialize, Debug)]
pub struct State<H: Handle> {
    #[serde(bound = "")]
    pub windows: Vec<ManagedWindow<H>>,
    pub screens: Screens,
    #[serde(bound = "")]
    pub stacking: LayerManager<H>,
    #[serde(bound = "")]
    pub mode: Mode<H>,
    /// Live pointer grabs. Owned here, not in a global, so independent
    /// engine instances never share drag state.
    pub grabs: u32,
    pub current_workspace: usize,
    pub workspace_count: usize,
    #[serde(bound = "")]
    pub actions: VecDeque<DisplayAction<H>>,
}

impl<H: Handle> State<H> {
    pub fn new(screens: Screens, workspace_count: usize) -> Result<Self> {
        if screens.heads.is_empty() {
            return Err(FrameError::NoScreens);
        }
        Ok(Self {
            windows: Vec::new(),
            screens,
            stacking: LayerManager::default(),
            mode: Mode::Normal,
            grabs: 0,
            current_workspace: 0,
            workspace_count: workspace_count.max(1),
            actions: VecDeque::new(),
        })
    }

    pub fn window(&self, handle: WindowHandle<H>) -> Option<&ManagedWindow<H>> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    pub fn window_mut(&mut self, handle: WindowHandle<H>) -> Option<&mut ManagedWindow<H>> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    /// Resolve the root of a transient (dialog) chain by bounded
    /// iteration. A chain that does not terminate within
    /// [`MAX_TRANSIENT_DEPTH`] hops is reported instead of followed
    /// forever.
    pub fn transient_root(&self, handle: WindowHandle<H>) -> Result<WindowHandle<H>> {
        let mut current = handle;
        for _ in 0..MAX_TRANSIENT_DEPTH {
            let win = self.window(current).ok_or(FrameError::WindowNotFound)?;
            match win.transient_for {
                Some(parent) if self.window(parent).is_some() => current = parent,
                _ => return Ok(current),
            }
        }
        tracing::warn!(?handle, "transient chain did not terminate");
        Err(FrameError::TransientLoop)
    }

    /// Every window whose transient chain ends at `root`, excluding
    /// `root` itself.
    pub fn transient_children(&self, root: WindowHandle<H>) -> Vec<WindowHandle<H>> {
        self.windows
            .iter()
            .filter(|w| w.handle != root)
            .filter(|w| self.transient_root(w.handle).is_ok_and(|r| r == root))
            .map(|w| w.handle)
            .collect()
    }

    /// Move every queued per-frame action into the shared queue, in
    /// window order, so the display server drains one stream.
    pub fn flush_frame_actions(&mut self) {
        for win in &mut self.windows {
            self.actions.append(&mut win.frame.actions);
        }
    }
}
