//! Settings menu rows: boolean toggles, cyclic enums, and fire-once actions.
//!
//! Rows own their values and notify hosts through callbacks; there is no
//! shared-memory binding to caller state. Every row label is a pure function
//! of `(row, is_highlighted)`, so any mutation or highlight move refreshes
//! the whole label cache.

use crate::input::InputKey;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One settings row. Each variant carries only the fields relevant to it.
pub enum MenuRow {
    Toggle {
        label: String,
        description: String,
        value: bool,
        on_change: Option<Box<dyn FnMut(bool)>>,
    },
    Cycle {
        label: String,
        description: String,
        options: Vec<String>,
        index: usize,
        on_change: Option<Box<dyn FnMut(&str, usize)>>,
    },
    Action {
        label: String,
        description: String,
        on_action: Box<dyn FnMut()>,
    },
}

impl MenuRow {
    fn description(&self) -> &str {
        match self {
            MenuRow::Toggle { description, .. }
            | MenuRow::Cycle { description, .. }
            | MenuRow::Action { description, .. } => description,
        }
    }
}

/// What the host should do after the menu handled (or declined) an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Input consumed; nothing further for the host to do.
    Handled,
    /// Input not meaningful to the menu.
    Ignored,
    /// Go back: redisplay the named previous page.
    SwitchTo(String),
}

pub struct SettingsMenu {
    rows: Vec<MenuRow>,
    highlighted: usize,
    labels: Vec<String>,
    previous_page: String,
    on_rebuild: Option<Box<dyn FnMut()>>,
}

impl SettingsMenu {
    /// Create an empty menu. `previous_page` is where Escape returns to when
    /// no rebuild callback is registered; `initial_highlight` names the row
    /// highlighted first, independent of insertion order.
    pub fn new(previous_page: impl Into<String>, initial_highlight: usize) -> Self {
        Self {
            rows: Vec::new(),
            highlighted: initial_highlight,
            labels: Vec::new(),
            previous_page: previous_page.into(),
            on_rebuild: None,
        }
    }

    /// Register a callback that rebuilds the previous screen from current
    /// state; when present it replaces the `SwitchTo` outcome on Escape.
    pub fn on_rebuild(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_rebuild = Some(Box::new(f));
        self
    }

    /// Append a boolean toggle row.
    pub fn add_toggle(
        mut self,
        label: impl Into<String>,
        description: impl Into<String>,
        value: bool,
        on_change: impl FnMut(bool) + 'static,
    ) -> Self {
        self.rows.push(MenuRow::Toggle {
            label: label.into(),
            description: description.into(),
            value,
            on_change: Some(Box::new(on_change)),
        });
        self.refresh_labels();
        self
    }

    /// Append an inline cycle selector row.
    pub fn add_cycle(
        mut self,
        label: impl Into<String>,
        description: impl Into<String>,
        options: Vec<String>,
        index: usize,
        on_change: impl FnMut(&str, usize) + 'static,
    ) -> Self {
        assert!(!options.is_empty(), "cycle row needs at least one option");
        assert!(
            index < options.len(),
            "cycle index out of range: {index} >= {}",
            options.len()
        );
        self.rows.push(MenuRow::Cycle {
            label: label.into(),
            description: description.into(),
            options,
            index,
            on_change: Some(Box::new(on_change)),
        });
        self.refresh_labels();
        self
    }

    /// Append an action row (submenu link or button).
    pub fn add_action(
        mut self,
        label: impl Into<String>,
        description: impl Into<String>,
        on_action: impl FnMut() + 'static,
    ) -> Self {
        self.rows.push(MenuRow::Action {
            label: label.into(),
            description: description.into(),
            on_action: Box::new(on_action),
        });
        self.refresh_labels();
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Current display labels, one per row.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Current value of a toggle row, if `index` is one.
    pub fn toggle_value(&self, index: usize) -> Option<bool> {
        match self.rows.get(index) {
            Some(MenuRow::Toggle { value, .. }) => Some(*value),
            _ => None,
        }
    }

    /// Current option index of a cycle row, if `index` is one.
    pub fn cycle_index(&self, index: usize) -> Option<usize> {
        match self.rows.get(index) {
            Some(MenuRow::Cycle { index, .. }) => Some(*index),
            _ => None,
        }
    }

    /// Move the highlight to `index` and refresh every row label.
    pub fn set_highlighted(&mut self, index: usize) {
        assert!(
            index < self.rows.len(),
            "highlight out of range: {index} >= {}",
            self.rows.len()
        );
        self.highlighted = index;
        self.refresh_labels();
    }

    fn row_label(row: &MenuRow, highlighted: bool) -> String {
        let prefix = if highlighted { ">" } else { "-" };
        match row {
            MenuRow::Toggle { label, value, .. } => {
                let mark = if *value { "[*]" } else { "[ ]" };
                format!("{prefix} {mark} {label}")
            }
            MenuRow::Cycle {
                label,
                options,
                index,
                ..
            } => format!("{prefix} {label}: < {} >", options[*index]),
            MenuRow::Action { label, .. } => format!("{prefix} {label}"),
        }
    }

    fn refresh_labels(&mut self) {
        self.labels = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| Self::row_label(row, i == self.highlighted))
            .collect();
    }

    /// Activate the highlighted row.
    pub fn activate(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        if matches!(self.rows[self.highlighted], MenuRow::Cycle { .. }) {
            self.cycle_highlighted(1);
            return;
        }
        let needs_refresh = match &mut self.rows[self.highlighted] {
            MenuRow::Toggle {
                value, on_change, ..
            } => {
                *value = !*value;
                let new_value = *value;
                if let Some(f) = on_change.as_mut() {
                    f(new_value);
                }
                true
            }
            MenuRow::Action { on_action, .. } => {
                // Actions navigate away or manage their own refresh.
                (on_action)();
                false
            }
            MenuRow::Cycle { .. } => false,
        };
        if needs_refresh {
            self.refresh_labels();
        }
    }

    /// Advance the highlighted cycle row by `delta` steps with wrap-around.
    /// Returns false when the highlighted row is not a cycle.
    fn cycle_highlighted(&mut self, delta: isize) -> bool {
        let Some(MenuRow::Cycle {
            options,
            index,
            on_change,
            ..
        }) = self.rows.get_mut(self.highlighted)
        else {
            return false;
        };

        let len = options.len() as isize;
        *index = ((*index as isize + delta).rem_euclid(len)) as usize;
        let (option, new_index) = (options[*index].clone(), *index);
        if let Some(f) = on_change.as_mut() {
            f(&option, new_index);
        }
        self.refresh_labels();
        true
    }

    pub fn handle_input(&mut self, key: InputKey) -> MenuOutcome {
        match key {
            InputKey::Up => {
                if !self.rows.is_empty() {
                    let prev = (self.highlighted + self.rows.len() - 1) % self.rows.len();
                    self.set_highlighted(prev);
                }
                MenuOutcome::Handled
            }
            InputKey::Down => {
                if !self.rows.is_empty() {
                    let next = (self.highlighted + 1) % self.rows.len();
                    self.set_highlighted(next);
                }
                MenuOutcome::Handled
            }
            InputKey::Activate => {
                self.activate();
                MenuOutcome::Handled
            }
            InputKey::Left => {
                if self.cycle_highlighted(-1) {
                    MenuOutcome::Handled
                } else {
                    MenuOutcome::Ignored
                }
            }
            InputKey::Right => {
                if self.cycle_highlighted(1) {
                    MenuOutcome::Handled
                } else {
                    MenuOutcome::Ignored
                }
            }
            InputKey::Escape => match self.on_rebuild.as_mut() {
                Some(f) => {
                    f();
                    MenuOutcome::Handled
                }
                None => MenuOutcome::SwitchTo(self.previous_page.clone()),
            },
            _ => MenuOutcome::Ignored,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let mut lines = Vec::with_capacity(self.rows.len() * 2);
        for (i, row) in self.rows.iter().enumerate() {
            let style = if i == self.highlighted {
                theme.highlight_style()
            } else {
                theme.text_style()
            };
            lines.push(Line::from(Span::styled(self.labels[i].clone(), style)));
            lines.push(Line::from(Span::styled(
                format!("  {}", row.description()),
                theme.description_style(),
            )));
        }
        Paragraph::new(lines).render(area, buf);
    }
}
