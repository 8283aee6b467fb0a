// navigation.rs - Per-window back/forward stack

use serde::Serialize;

/// Which navigation controls are usable. Derived from the stack, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavButtons {
    pub back: bool,
    pub forward: bool,
    pub refresh: bool,
}

/// Append-only list of visited entries with a movable pointer.
///
/// `index` is an offset from the newest entry: `0` is the newest page and
/// `-(len - 1)` the oldest. Back/forward only move the pointer; a new visit
/// discards everything ahead of it.
#[derive(Debug, Clone)]
pub struct NavigationStack<T> {
    entries: Vec<T>,
    index: isize,
}

impl<T> Default for NavigationStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigationStack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
        }
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    fn position(&self) -> Option<usize> {
        let position = self.entries.len() as isize - 1 + self.index;
        usize::try_from(position).ok()
    }

    /// Entry the pointer is on
    pub fn current(&self) -> Option<&T> {
        self.position().and_then(|p| self.entries.get(p))
    }

    /// Record a new navigation. Entries forward of the pointer are dropped.
    pub fn visit(&mut self, entry: T) {
        if let Some(position) = self.position() {
            self.entries.truncate(position + 1);
        }
        self.entries.push(entry);
        self.index = 0;
    }

    /// Move one entry towards the oldest. Returns the new current entry, or
    /// `None` (leaving the pointer alone) when already at the oldest.
    pub fn back(&mut self) -> Option<&T> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Move one entry towards the newest
    pub fn forward(&mut self) -> Option<&T> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.index.unsigned_abs() + 1 != self.entries.len()
    }

    pub fn can_go_forward(&self) -> bool {
        self.index != 0
    }

    pub fn can_refresh(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn buttons(&self) -> NavButtons {
        NavButtons {
            back: self.can_go_back(),
            forward: self.can_go_forward(),
            refresh: self.can_refresh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(pages: &[&'static str]) -> NavigationStack<&'static str> {
        let mut stack = NavigationStack::new();
        for page in pages {
            stack.visit(*page);
        }
        stack
    }

    #[test]
    fn test_empty_stack() {
        let mut stack: NavigationStack<&str> = NavigationStack::new();
        assert_eq!(stack.buttons(), NavButtons::default());
        assert!(stack.back().is_none());
        assert!(stack.forward().is_none());
        assert!(stack.current().is_none());
        assert_eq!(stack.index(), 0);
    }

    #[test]
    fn test_three_visits_then_back_twice() {
        let mut stack = stack_of(&["A", "B", "C"]);
        assert_eq!(stack.index(), 0);
        assert_eq!(stack.current(), Some(&"C"));
        assert!(stack.buttons().back);
        assert!(!stack.buttons().forward);

        assert_eq!(stack.back(), Some(&"B"));
        assert_eq!(stack.back(), Some(&"A"));
        assert_eq!(stack.index(), -2);
        assert!(stack.buttons().forward);
        assert!(!stack.buttons().back);

        // Already at the oldest entry
        assert!(stack.back().is_none());
        assert_eq!(stack.index(), -2);
    }

    #[test]
    fn test_new_visit_discards_forward_branch() {
        let mut stack = stack_of(&["A", "B", "C"]);
        stack.back();
        assert_eq!(stack.index(), -1);
        assert_eq!(stack.current(), Some(&"B"));

        stack.visit("D");
        assert_eq!(stack.entries(), &["A", "B", "D"]);
        assert_eq!(stack.index(), 0);
        assert!(!stack.buttons().forward);
    }

    #[test]
    fn test_forward_returns_to_newest() {
        let mut stack = stack_of(&["A", "B"]);
        stack.back();
        assert_eq!(stack.forward(), Some(&"B"));
        assert_eq!(stack.index(), 0);
        assert!(stack.forward().is_none());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_single_entry_buttons() {
        let stack = stack_of(&["A"]);
        assert_eq!(
            stack.buttons(),
            NavButtons {
                back: false,
                forward: false,
                refresh: true
            }
        );
    }
}
