//! Wrap-around focus ring for a horizontal button bar.
//!
//! The ring owns only the ordered membership; the host tracks which target
//! currently has focus and asks the ring for neighbors on Left/Right.

use crate::input::InputKey;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct FocusRing {
    targets: Vec<String>,
    on_escape: Option<Box<dyn FnMut()>>,
}

impl FocusRing {
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            on_escape: None,
        }
    }

    pub fn on_escape(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_escape = Some(Box::new(f));
        self
    }

    pub fn push(&mut self, target: impl Into<String>) {
        self.targets.push(target.into());
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Previous and next indices of `index`, wrapping at both ends. An empty
    /// ring or an out-of-range index is a caller bug.
    pub fn neighbors(&self, index: usize) -> (usize, usize) {
        let n = self.targets.len();
        assert!(n > 0, "neighbors on an empty focus ring");
        assert!(index < n, "focus index out of range: {index} >= {n}");
        ((index + n - 1) % n, (index + 1) % n)
    }

    /// Map an input to a new focus index for the host. Left/Right return the
    /// neighbor to move to; Escape fires the callback instead of moving.
    pub fn handle_input(&mut self, key: InputKey, current: usize) -> Option<usize> {
        match key {
            InputKey::Left => Some(self.neighbors(current).0),
            InputKey::Right => Some(self.neighbors(current).1),
            InputKey::Escape => {
                if let Some(f) = self.on_escape.as_mut() {
                    f();
                }
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, current: usize) {
        let mut spans = Vec::with_capacity(self.targets.len() * 2);
        for (i, target) in self.targets.iter().enumerate() {
            let style = if i == current {
                theme.highlight_style()
            } else {
                theme.label_style()
            };
            spans.push(Span::styled(format!("[ {target} ]"), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
