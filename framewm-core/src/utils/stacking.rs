//! Stacking-order bookkeeping with deferred restack notification.
//!
//! Raising a window together with its transient chain touches the order
//! several times; bracketing those calls in `lock`/`unlock` collapses
//! them into a single [`DisplayAction::SetWindowOrder`].
use std::collections::VecDeque;

use crate::display_action::DisplayAction;
use crate::models::{Handle, WindowHandle};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LayerManager<H: Handle> {
    /// Top-most first.
    #[serde(bound = "")]
    order: Vec<WindowHandle<H>>,
    locks: u32,
    dirty: bool,
}

impl<H: Handle> LayerManager<H> {
    pub fn order(&self) -> &[WindowHandle<H>] {
        &self.order
    }

    /// New windows enter on top.
    pub fn insert(&mut self, handle: WindowHandle<H>, actions: &mut VecDeque<DisplayAction<H>>) {
        if self.order.contains(&handle) {
            return;
        }
        self.order.insert(0, handle);
        self.notify(actions);
    }

    pub fn remove(&mut self, handle: WindowHandle<H>, actions: &mut VecDeque<DisplayAction<H>>) {
        let Some(idx) = self.order.iter().position(|h| *h == handle) else {
            return;
        };
        self.order.remove(idx);
        self.notify(actions);
    }

    pub fn raise(&mut self, handle: WindowHandle<H>, actions: &mut VecDeque<DisplayAction<H>>) {
        let Some(idx) = self.order.iter().position(|h| *h == handle) else {
            return;
        };
        if idx != 0 {
            let handle = self.order.remove(idx);
            self.order.insert(0, handle);
        }
        self.notify(actions);
    }

    pub fn lower(&mut self, handle: WindowHandle<H>, actions: &mut VecDeque<DisplayAction<H>>) {
        let Some(idx) = self.order.iter().position(|h| *h == handle) else {
            return;
        };
        if idx + 1 != self.order.len() {
            let handle = self.order.remove(idx);
            self.order.push(handle);
        }
        self.notify(actions);
    }

    /// Hold back restack notifications until the matching `unlock`.
    pub fn lock(&mut self) {
        self.locks += 1;
    }

    pub fn unlock(&mut self, actions: &mut VecDeque<DisplayAction<H>>) {
        self.locks = self.locks.saturating_sub(1);
        if self.locks == 0 && self.dirty {
            self.notify(actions);
        }
    }

    fn notify(&mut self, actions: &mut VecDeque<DisplayAction<H>>) {
        if self.locks > 0 {
            self.dirty = true;
            return;
        }
        self.dirty = false;
        actions.push_back(DisplayAction::SetWindowOrder(self.order.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    fn setup() -> (LayerManager<MockHandle>, VecDeque<DisplayAction<MockHandle>>) {
        let mut layers = LayerManager::default();
        let mut actions = VecDeque::new();
        for id in 1..=3 {
            layers.insert(WindowHandle(id), &mut actions);
        }
        actions.clear();
        (layers, actions)
    }

    #[test]
    fn raise_moves_to_front_and_notifies() {
        let (mut layers, mut actions) = setup();
        layers.raise(WindowHandle(1), &mut actions);
        assert_eq!(layers.order()[0], WindowHandle(1));
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            actions.front(),
            Some(DisplayAction::SetWindowOrder(order)) if order[0] == WindowHandle(1)
        ));
    }

    #[test]
    fn lower_moves_to_back() {
        let (mut layers, mut actions) = setup();
        let top = layers.order()[0];
        layers.lower(top, &mut actions);
        assert_eq!(*layers.order().last().unwrap(), top);
    }

    #[test]
    fn locked_restacks_collapse_into_one() {
        let (mut layers, mut actions) = setup();
        layers.lock();
        layers.raise(WindowHandle(1), &mut actions);
        layers.raise(WindowHandle(2), &mut actions);
        layers.raise(WindowHandle(3), &mut actions);
        assert!(actions.is_empty());
        layers.unlock(&mut actions);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn unknown_handle_is_ignored() {
        let (mut layers, mut actions) = setup();
        layers.raise(WindowHandle(99), &mut actions);
        assert!(actions.is_empty());
    }
}
