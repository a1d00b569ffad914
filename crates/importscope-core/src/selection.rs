//! Hover/lock selection state owned by graph viewers

use crate::graph::NodeId;

/// Observable selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState<'a> {
    None,
    Hovered(&'a NodeId),
    Locked(&'a NodeId),
}

/// Selection value held by the caller and passed into highlight queries.
///
/// Hover is always tracked, but a locked node takes priority for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    hovered: Option<NodeId>,
    locked: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a node (`Some`) or left all nodes (`None`).
    pub fn hover(&mut self, node: Option<NodeId>) {
        self.hovered = node;
    }

    /// Clicking the locked node unlocks it; clicking any other node locks it.
    pub fn click_node(&mut self, node: NodeId) {
        if self.locked.as_ref() == Some(&node) {
            self.clear();
        } else {
            self.locked = Some(node);
        }
    }

    /// Clicking empty background releases a lock.
    pub fn click_background(&mut self) {
        if self.locked.is_some() {
            self.clear();
        }
    }

    /// Picking a search result always locks it.
    pub fn select_search_result(&mut self, node: NodeId) {
        self.locked = Some(node);
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.locked = None;
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn locked(&self) -> Option<&NodeId> {
        self.locked.as_ref()
    }

    /// `locked ?? hovered`.
    pub fn active(&self) -> Option<&NodeId> {
        self.locked.as_ref().or(self.hovered.as_ref())
    }

    pub fn state(&self) -> SelectionState<'_> {
        match (&self.locked, &self.hovered) {
            (Some(locked), _) => SelectionState::Locked(locked),
            (None, Some(hovered)) => SelectionState::Hovered(hovered),
            (None, None) => SelectionState::None,
        }
    }
}
