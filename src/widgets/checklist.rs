//! Multi-select checklist.
//!
//! Owns an ordered list of entries and a sparse set of selected indices.
//! Toggling an index recomputes the selected-values list (entries order, not
//! toggle order) and notifies the change listener, then the selection-sync
//! listener, in that order.

use crate::input::InputKey;
use crate::theme::Theme;
use crate::widgets::Entry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::HashSet;

pub struct CheckList {
    entries: Vec<Entry>,
    selected: HashSet<usize>,
    cursor: usize,
    on_change: Option<Box<dyn FnMut(&[String])>>,
    on_selection_sync: Option<Box<dyn FnMut(usize)>>,
    on_escape: Option<Box<dyn FnMut()>>,
}

impl CheckList {
    /// Create a checklist. Entries whose value matches any string in
    /// `initially_selected` start selected; unmatched values are silently
    /// ignored.
    pub fn new(entries: Vec<Entry>, initially_selected: &[String]) -> Self {
        let selected = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| initially_selected.iter().any(|v| *v == entry.value))
            .map(|(i, _)| i)
            .collect();

        Self {
            entries,
            selected,
            cursor: 0,
            on_change: None,
            on_selection_sync: None,
            on_escape: None,
        }
    }

    /// Convenience constructor for items whose values equal their labels.
    pub fn from_labels(labels: &[&str], initially_selected: &[String]) -> Self {
        let entries = labels.iter().map(|l| Entry::from_label(*l)).collect();
        Self::new(entries, initially_selected)
    }

    /// Register the change listener; receives the full selected-values list
    /// after every toggle.
    pub fn on_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Register the selection-sync listener; receives the selected count,
    /// after the change listener, on every toggle.
    pub fn on_selection_sync(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_selection_sync = Some(Box::new(f));
        self
    }

    pub fn on_escape(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_escape = Some(Box::new(f));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Flip membership of `index` and notify listeners. Out-of-range indices
    /// are a caller bug.
    pub fn toggle(&mut self, index: usize) {
        assert!(
            index < self.entries.len(),
            "checklist toggle out of range: {index} >= {}",
            self.entries.len()
        );

        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }

        let values = self.selected_values();
        let count = values.len();
        if let Some(f) = self.on_change.as_mut() {
            f(&values);
        }
        if let Some(f) = self.on_selection_sync.as_mut() {
            f(count);
        }
    }

    /// Values of all selected entries, in entries order.
    pub fn selected_values(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, _)| self.selected.contains(i))
            .map(|(_, entry)| entry.value.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Display text for one row.
    pub fn row_label(&self, index: usize) -> String {
        let mark = if self.selected.contains(&index) {
            "[*]"
        } else {
            "[ ]"
        };
        format!("{mark} {}", self.entries[index].label)
    }

    /// Handle a logical input event. Up/Down wrap around the list, Activate
    /// toggles the row under the cursor.
    pub fn handle_input(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Up => {
                if !self.entries.is_empty() {
                    self.cursor = (self.cursor + self.entries.len() - 1) % self.entries.len();
                }
                true
            }
            InputKey::Down => {
                if !self.entries.is_empty() {
                    self.cursor = (self.cursor + 1) % self.entries.len();
                }
                true
            }
            InputKey::Activate => {
                if !self.entries.is_empty() {
                    self.toggle(self.cursor);
                }
                true
            }
            InputKey::Escape => {
                if let Some(f) = self.on_escape.as_mut() {
                    f();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let lines: Vec<Line> = (0..self.entries.len())
            .map(|i| {
                let style = if i == self.cursor {
                    theme.highlight_style()
                } else {
                    theme.text_style()
                };
                Line::from(Span::styled(self.row_label(i), style))
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn values(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_creation() {
        let cl = CheckList::from_labels(&["Item 1", "Item 2", "Item 3"], &[]);
        assert_eq!(cl.len(), 3);
        assert!(cl.selected_values().is_empty());
        assert_eq!(cl.selected_count(), 0);
    }

    #[test]
    fn test_initial_selection() {
        let cl = CheckList::from_labels(&["A", "B", "C", "D"], &values(&["B", "D"]));
        assert_eq!(cl.selected_values(), values(&["B", "D"]));
        assert_eq!(cl.selected_count(), 2);
    }

    #[test]
    fn test_toggle_sequence_keeps_entries_order() {
        let mut cl = CheckList::from_labels(&["A", "B", "C"], &values(&["B"]));
        assert_eq!(cl.selected_count(), 1);
        assert_eq!(cl.selected_values(), values(&["B"]));

        cl.toggle(0);
        assert_eq!(cl.selected_values(), values(&["A", "B"]));
        assert_eq!(cl.selected_count(), 2);

        cl.toggle(1);
        assert_eq!(cl.selected_values(), values(&["A"]));
    }

    #[test]
    fn test_toggle_fires_on_change() {
        let last = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&last);
        let mut cl = CheckList::from_labels(&["A", "B", "C"], &[])
            .on_change(move |sel| *seen.borrow_mut() = sel.to_vec());

        cl.toggle(0);
        assert_eq!(*last.borrow(), values(&["A"]));

        cl.toggle(2);
        assert_eq!(*last.borrow(), values(&["A", "C"]));

        cl.toggle(0);
        assert_eq!(*last.borrow(), values(&["C"]));

        cl.toggle(2);
        assert!(last.borrow().is_empty());
    }

    #[test]
    fn test_toggle_returns_values_not_labels() {
        let entries = vec![
            Entry::new("Display Name", "actual_value"),
            Entry::new("Another Display", "another_value"),
        ];
        let last = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&last);
        let mut cl =
            CheckList::new(entries, &[]).on_change(move |sel| *seen.borrow_mut() = sel.to_vec());

        cl.toggle(0);
        assert_eq!(*last.borrow(), values(&["actual_value"]));
    }

    #[test]
    fn test_sync_fires_after_change() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let changes = Rc::clone(&order);
        let syncs = Rc::clone(&order);
        let mut cl = CheckList::from_labels(&["A", "B"], &[])
            .on_change(move |_| changes.borrow_mut().push("change"))
            .on_selection_sync(move |_| syncs.borrow_mut().push("sync"));

        cl.toggle(0);
        cl.toggle(1);
        assert_eq!(*order.borrow(), vec!["change", "sync", "change", "sync"]);
    }

    #[test]
    fn test_selection_sync_count() {
        let count = Rc::new(RefCell::new(0usize));
        let seen = Rc::clone(&count);
        let mut cl = CheckList::from_labels(&["A", "B", "C"], &[])
            .on_selection_sync(move |n| *seen.borrow_mut() = n);

        cl.toggle(0);
        assert_eq!(*count.borrow(), 1);
        cl.toggle(1);
        assert_eq!(*count.borrow(), 2);
        cl.toggle(0);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut cl = CheckList::from_labels(&["A", "B", "C"], &values(&["B"]));
        cl.toggle(2);
        cl.toggle(2);
        assert_eq!(cl.selected_values(), values(&["B"]));
        assert_eq!(cl.selected_count(), 1);
    }

    #[test]
    fn test_no_callbacks_is_fine() {
        let mut cl = CheckList::from_labels(&["A", "B", "C"], &[]);
        cl.toggle(0);
        cl.toggle(1);
        cl.toggle(0);
        assert_eq!(cl.selected_values(), values(&["B"]));
    }

    #[test]
    fn test_mismatched_initial_values_ignored() {
        let entries = vec![Entry::new("Item A", "a"), Entry::new("Item B", "b")];
        let cl = CheckList::new(entries, &values(&["x", "y", "z"]));
        assert_eq!(cl.selected_count(), 0);
        assert!(cl.selected_values().is_empty());
    }

    #[test]
    fn test_row_label() {
        let mut cl = CheckList::from_labels(&["Test Item"], &[]);
        assert_eq!(cl.row_label(0), "[ ] Test Item");
        cl.toggle(0);
        assert_eq!(cl.row_label(0), "[*] Test Item");
    }

    #[test]
    fn test_empty_list() {
        let cl = CheckList::from_labels(&[], &[]);
        assert!(cl.is_empty());
        assert_eq!(cl.selected_count(), 0);
    }

    #[test]
    fn test_cursor_navigation_wraps_and_toggles() {
        let mut cl = CheckList::from_labels(&["A", "B", "C"], &[]);
        cl.handle_input(InputKey::Up);
        assert_eq!(cl.cursor(), 2);
        cl.handle_input(InputKey::Down);
        assert_eq!(cl.cursor(), 0);
        cl.handle_input(InputKey::Down);
        cl.handle_input(InputKey::Activate);
        assert!(cl.is_selected(1));
    }

    #[test]
    fn test_escape_fires_callback() {
        let fired = Rc::new(RefCell::new(false));
        let seen = Rc::clone(&fired);
        let mut cl = CheckList::from_labels(&["A"], &[]).on_escape(move || *seen.borrow_mut() = true);
        assert!(cl.handle_input(InputKey::Escape));
        assert!(*fired.borrow());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_toggle_out_of_range_panics() {
        let mut cl = CheckList::from_labels(&["A"], &[]);
        cl.toggle(5);
    }
}
