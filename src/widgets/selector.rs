//! Single/multi mode selector.
//!
//! One widget serves two mutually exclusive modes: single-choice with an
//! optional synthetic "All" row, or independent multi-select. Both modes are
//! unified behind the same `selected_values`/`selected_count` query surface.
//! In single mode with the All row enabled, display row 0 is All and real
//! entries occupy rows 1..=N; choosing All maps to an empty selected-value.

use crate::input::InputKey;
use crate::theme::Theme;
use crate::widgets::Entry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMode {
    Single,
    Multi,
}

/// Construction parameters, mirroring how hosts describe a selector in one
/// place before handing it callbacks.
pub struct SelectorConfig {
    pub mode: SelectorMode,
    /// Whether single mode offers the synthetic "All" row. Ignored in multi
    /// mode.
    pub include_all: bool,
    pub entries: Vec<Entry>,
    /// Initial selection by entry value. Single mode reads the first element;
    /// an empty or unmatched value selects All (or nothing). Multi mode
    /// matches like a checklist.
    pub initially_selected: Vec<String>,
}

pub struct Selector {
    mode: SelectorMode,
    include_all: bool,
    entries: Vec<Entry>,
    cursor: usize,
    // Multi-mode selection; unused in single mode.
    selected: HashSet<usize>,
    // Single-mode choice (entry index); None means All or nothing chosen.
    single_choice: Option<usize>,
    on_single: Option<Box<dyn FnMut(&str)>>,
    on_multi: Option<Box<dyn FnMut(&[String])>>,
}

impl Selector {
    pub fn new(config: SelectorConfig) -> Self {
        let SelectorConfig {
            mode,
            include_all,
            entries,
            initially_selected,
        } = config;

        let mut selected = HashSet::new();
        let mut single_choice = None;
        match mode {
            SelectorMode::Single => {
                single_choice = initially_selected
                    .first()
                    .and_then(|v| entries.iter().position(|e| e.value == *v));
            }
            SelectorMode::Multi => {
                selected = entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| initially_selected.iter().any(|v| *v == e.value))
                    .map(|(i, _)| i)
                    .collect();
            }
        }

        Self {
            mode,
            include_all: include_all && mode == SelectorMode::Single,
            entries,
            cursor: 0,
            selected,
            single_choice,
            on_single: None,
            on_multi: None,
        }
    }

    /// Register the single-mode listener; receives the chosen entry's value,
    /// or `""` for the All row.
    pub fn on_single(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_single = Some(Box::new(f));
        self
    }

    /// Register the multi-mode listener; receives the full selected-values
    /// list after every toggle.
    pub fn on_multi(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.on_multi = Some(Box::new(f));
        self
    }

    pub fn mode(&self) -> SelectorMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of display rows, including the All row when present.
    pub fn row_count(&self) -> usize {
        self.entries.len() + usize::from(self.include_all)
    }

    /// Single mode: choose an entry, or `None` for the All row. The All row
    /// must be enabled to choose it; out-of-range entries are a caller bug.
    pub fn select_single(&mut self, choice: Option<usize>) {
        assert!(
            self.mode == SelectorMode::Single,
            "select_single called on a multi-mode selector"
        );
        match choice {
            None => assert!(self.include_all, "All sentinel is not enabled"),
            Some(i) => assert!(
                i < self.entries.len(),
                "selector index out of range: {i} >= {}",
                self.entries.len()
            ),
        }

        self.single_choice = choice;
        let value = choice
            .map(|i| self.entries[i].value.clone())
            .unwrap_or_default();
        if let Some(f) = self.on_single.as_mut() {
            f(&value);
        }
    }

    /// Multi mode: flip membership of an entry, checklist contract.
    pub fn toggle_multi(&mut self, index: usize) {
        assert!(
            self.mode == SelectorMode::Multi,
            "toggle_multi called on a single-mode selector"
        );
        assert!(
            index < self.entries.len(),
            "selector index out of range: {index} >= {}",
            self.entries.len()
        );

        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        let values = self.selected_values();
        if let Some(f) = self.on_multi.as_mut() {
            f(&values);
        }
    }

    /// Selected entry values in entries order: empty for All, a singleton
    /// for a single choice, the full set for multi mode.
    pub fn selected_values(&self) -> Vec<String> {
        match self.mode {
            SelectorMode::Single => self
                .single_choice
                .map(|i| vec![self.entries[i].value.clone()])
                .unwrap_or_default(),
            SelectorMode::Multi => self
                .entries
                .iter()
                .enumerate()
                .filter(|(i, _)| self.selected.contains(i))
                .map(|(_, e)| e.value.clone())
                .collect(),
        }
    }

    pub fn selected_count(&self) -> usize {
        match self.mode {
            SelectorMode::Single => usize::from(self.single_choice.is_some()),
            SelectorMode::Multi => self.selected.len(),
        }
    }

    /// Display text for one row; `row` is a display index (All row included).
    pub fn row_label(&self, row: usize) -> String {
        match self.mode {
            SelectorMode::Single => {
                if self.include_all && row == 0 {
                    let mark = if self.single_choice.is_none() { "(*)" } else { "( )" };
                    format!("{mark} All")
                } else {
                    let entry = row - usize::from(self.include_all);
                    let mark = if self.single_choice == Some(entry) {
                        "(*)"
                    } else {
                        "( )"
                    };
                    format!("{mark} {}", self.entries[entry].label)
                }
            }
            SelectorMode::Multi => {
                let mark = if self.selected.contains(&row) { "[*]" } else { "[ ]" };
                format!("{mark} {}", self.entries[row].label)
            }
        }
    }

    /// Handle a logical input event. Escape is left to the host (returns
    /// false) so it can close the surrounding overlay.
    pub fn handle_input(&mut self, key: InputKey) -> bool {
        let rows = self.row_count();
        match key {
            InputKey::Up => {
                if rows > 0 {
                    self.cursor = (self.cursor + rows - 1) % rows;
                }
                true
            }
            InputKey::Down => {
                if rows > 0 {
                    self.cursor = (self.cursor + 1) % rows;
                }
                true
            }
            InputKey::Activate => {
                if rows == 0 {
                    return true;
                }
                match self.mode {
                    SelectorMode::Single => {
                        let choice = if self.include_all && self.cursor == 0 {
                            None
                        } else {
                            Some(self.cursor - usize::from(self.include_all))
                        };
                        self.select_single(choice);
                    }
                    SelectorMode::Multi => self.toggle_multi(self.cursor),
                }
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Select System ")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = (0..self.row_count())
            .map(|row| {
                let style = if row == self.cursor {
                    theme.highlight_style()
                } else {
                    theme.text_style()
                };
                Line::from(Span::styled(self.row_label(row), style))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
