//! Whether the navigation sidebar is expanded.

use tracing::debug;

/// Single source of truth for the sidebar. Consumers read through
/// [`SidebarStore::is_expanded`] and change it only through the mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarStore {
    expanded: bool,
}

impl SidebarStore {
    pub fn new() -> Self {
        Self { expanded: true }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        debug!(expanded = self.expanded, "sidebar toggled");
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }
}

impl Default for SidebarStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_expanded() {
        assert!(SidebarStore::default().is_expanded());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = SidebarStore::new();
        store.toggle();
        assert!(!store.is_expanded());
        store.toggle();
        assert!(store.is_expanded());
    }

    #[test]
    fn test_expand_and_collapse_are_unconditional() {
        let mut store = SidebarStore::new();
        store.collapse();
        store.collapse();
        assert!(!store.is_expanded());
        store.expand();
        store.expand();
        assert!(store.is_expanded());
    }
}
