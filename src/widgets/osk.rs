//! On-screen keyboard for controller-style input.
//!
//! The keyboard owns three fixed layout grids (lowercase, uppercase,
//! symbols), a 2-D cursor into the active grid, shift/symbols mode flags,
//! and the text buffer being edited. Directional input moves the cursor with
//! wrap-around; activation reads the legend under the cursor and either
//! appends to the buffer or performs the legend's action.

use crate::input::InputKey;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

// Legends for the action keys.
pub const KEY_BACKSPACE: &str = "DEL";
pub const KEY_SUBMIT: &str = "OK";
pub const KEY_SHIFT: &str = "SHFT";
pub const KEY_SYMBOLS: &str = "SYM";
pub const KEY_SPACE: &str = "SPC";
pub const KEY_CANCEL: &str = "CANC";

type Layout = &'static [&'static [&'static str]];

const KEYS_LOWER: Layout = &[
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    &["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"],
    &["a", "s", "d", "f", "g", "h", "j", "k", "l"],
    &["z", "x", "c", "v", "b", "n", "m", ",", "."],
    &[KEY_SHIFT, KEY_SYMBOLS, KEY_SPACE, KEY_BACKSPACE, KEY_SUBMIT, KEY_CANCEL],
];

const KEYS_UPPER: Layout = &[
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
    &["Z", "X", "C", "V", "B", "N", "M", ",", "."],
    &[KEY_SHIFT, KEY_SYMBOLS, KEY_SPACE, KEY_BACKSPACE, KEY_SUBMIT, KEY_CANCEL],
];

const KEYS_SYMBOLS: Layout = &[
    &["!", "@", "#", "$", "%", "^", "&", "*", "(", ")"],
    &["-", "_", "=", "+", "[", "]", "{", "}", "\\", "|"],
    &[";", ":", "'", "\"", "`", "~", "/", "?", "<", ">"],
    &[KEY_SYMBOLS, KEY_SPACE, KEY_BACKSPACE, KEY_SUBMIT, KEY_CANCEL],
];

/// Returns true if the legend triggers an action rather than appending text.
///
/// The fixed action set plus any multi-character legend counts as an action;
/// single-character legends are always printable.
pub fn is_action_key(legend: &str) -> bool {
    matches!(
        legend,
        KEY_BACKSPACE | KEY_SUBMIT | KEY_SHIFT | KEY_SYMBOLS | KEY_SPACE | KEY_CANCEL
    ) || legend.chars().count() > 1
}

/// A virtual keyboard driven by directional navigation and activation.
pub struct OnScreenKeyboard {
    text: String,
    cursor_row: usize,
    cursor_col: usize,
    shift_on: bool,
    symbols_on: bool,
    on_submit: Option<Box<dyn FnMut(&str)>>,
    on_cancel: Option<Box<dyn FnMut()>>,
}

impl OnScreenKeyboard {
    /// Create a keyboard editing `initial_text`, cursor at the top-left key.
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self {
            text: initial_text.into(),
            cursor_row: 0,
            cursor_col: 0,
            shift_on: false,
            symbols_on: false,
            on_submit: None,
            on_cancel: None,
        }
    }

    /// Register the submit callback, fired with the buffer contents when the
    /// submit key is activated.
    pub fn on_submit(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    /// Register the cancel callback, fired on the cancel key or Escape.
    pub fn on_cancel(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn shift_on(&self) -> bool {
        self.shift_on
    }

    pub fn symbols_on(&self) -> bool {
        self.symbols_on
    }

    /// The active layout grid. Symbols take precedence over shift; the shift
    /// flag keeps its value while symbols are active.
    pub fn current_layout(&self) -> Layout {
        if self.symbols_on {
            KEYS_SYMBOLS
        } else if self.shift_on {
            KEYS_UPPER
        } else {
            KEYS_LOWER
        }
    }

    /// Handle a logical input event. Always consumes the event; every key
    /// has a meaning on the keyboard.
    pub fn handle_input(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Up => self.move_vertical(true),
            InputKey::Down => self.move_vertical(false),
            InputKey::Left => self.move_horizontal(true),
            InputKey::Right => self.move_horizontal(false),
            InputKey::Activate => self.activate_key(),
            InputKey::Escape => self.fire_cancel(),
            InputKey::Backspace => {
                self.text.pop();
            }
            InputKey::Char(c) => {
                // Direct input from a physical keyboard bypasses the grid.
                self.text.push(c);
            }
        }
        true
    }

    fn move_vertical(&mut self, up: bool) {
        let layout = self.current_layout();
        let rows = layout.len();
        self.cursor_row = if up {
            (self.cursor_row + rows - 1) % rows
        } else {
            (self.cursor_row + 1) % rows
        };
        // Landing in a shorter row clamps the column to its last valid key.
        let row_len = layout[self.cursor_row].len();
        if self.cursor_col >= row_len {
            self.cursor_col = row_len - 1;
        }
    }

    fn move_horizontal(&mut self, left: bool) {
        let layout = self.current_layout();
        let cols = layout[self.cursor_row].len();
        self.cursor_col = if left {
            (self.cursor_col + cols - 1) % cols
        } else {
            (self.cursor_col + 1) % cols
        };
    }

    /// Re-clamp the cursor after a layout switch. Clamps to the nearest
    /// valid row and column, never back to the origin.
    fn clamp_cursor(&mut self) {
        let layout = self.current_layout();
        if self.cursor_row >= layout.len() {
            self.cursor_row = layout.len() - 1;
        }
        let row_len = layout[self.cursor_row].len();
        if self.cursor_col >= row_len {
            self.cursor_col = row_len - 1;
        }
    }

    /// Perform the action for the key under the cursor.
    pub fn activate_key(&mut self) {
        let legend = self.current_layout()[self.cursor_row][self.cursor_col];

        match legend {
            KEY_BACKSPACE => {
                self.text.pop();
            }
            KEY_SUBMIT => {
                if let Some(f) = self.on_submit.as_mut() {
                    tracing::debug!(len = self.text.len(), "keyboard submit");
                    f(&self.text);
                }
            }
            KEY_SHIFT => {
                self.shift_on = !self.shift_on;
                self.clamp_cursor();
            }
            KEY_SYMBOLS => {
                self.symbols_on = !self.symbols_on;
                self.clamp_cursor();
            }
            KEY_SPACE => {
                self.text.push(' ');
            }
            KEY_CANCEL => {
                self.fire_cancel();
            }
            _ => {
                // Multi-character legends never append literally.
                if is_action_key(legend) {
                    return;
                }
                self.text.push_str(legend);
                // Shift is one-shot; symbols stay latched.
                if self.shift_on {
                    self.shift_on = false;
                    self.clamp_cursor();
                }
            }
        }
    }

    fn fire_cancel(&mut self) {
        if let Some(f) = self.on_cancel.as_mut() {
            tracing::debug!("keyboard cancel");
            f();
        }
    }

    /// Render the input line and key grid.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard ")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::with_capacity(self.current_layout().len() + 1);
        lines.push(Line::from(Span::styled(
            format!("{}_", self.text),
            theme.label_style(),
        )));

        for (row_idx, row) in self.current_layout().iter().enumerate() {
            let mut spans = Vec::with_capacity(row.len());
            for (col_idx, key) in row.iter().enumerate() {
                let selected = row_idx == self.cursor_row && col_idx == self.cursor_col;
                let style = if selected {
                    theme.highlight_style()
                } else if is_action_key(key) {
                    theme.label_style()
                } else {
                    theme.text_style()
                };
                let pad = " ".repeat(3usize.saturating_sub(key.width()));
                spans.push(Span::styled(format!("{key}{pad} "), style));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_new_keyboard() {
        let osk = OnScreenKeyboard::new("initial");
        assert_eq!(osk.text(), "initial");
        assert_eq!(osk.cursor(), (0, 0));
        assert!(!osk.shift_on());
        assert!(!osk.symbols_on());
    }

    #[test]
    fn test_layout_switching() {
        let mut osk = OnScreenKeyboard::new("");
        assert_eq!(osk.current_layout()[1][0], "q");

        osk.shift_on = true;
        assert_eq!(osk.current_layout()[1][0], "Q");

        // Symbols take precedence over shift.
        osk.symbols_on = true;
        assert_eq!(osk.current_layout()[0][0], "!");
        assert!(osk.shift_on(), "shift flag preserved under symbols");
    }

    #[test]
    fn test_navigation() {
        let mut osk = OnScreenKeyboard::new("");

        osk.handle_input(InputKey::Right);
        assert_eq!(osk.cursor(), (0, 1));

        osk.handle_input(InputKey::Down);
        assert_eq!(osk.cursor(), (1, 1));

        osk.handle_input(InputKey::Left);
        assert_eq!(osk.cursor(), (1, 0));

        osk.handle_input(InputKey::Up);
        assert_eq!(osk.cursor(), (0, 0));
    }

    #[test]
    fn test_wrap_around() {
        let mut osk = OnScreenKeyboard::new("");
        let layout = osk.current_layout();

        osk.handle_input(InputKey::Up);
        assert_eq!(osk.cursor().0, layout.len() - 1);

        osk.handle_input(InputKey::Down);
        assert_eq!(osk.cursor().0, 0);

        osk.handle_input(InputKey::Left);
        assert_eq!(osk.cursor().1, layout[0].len() - 1);

        osk.handle_input(InputKey::Right);
        assert_eq!(osk.cursor().1, 0);
    }

    #[test]
    fn test_vertical_wrap_returns_to_start_row() {
        let mut osk = OnScreenKeyboard::new("");
        osk.symbols_on = true; // 4-row grid
        for _ in 0..4 {
            osk.handle_input(InputKey::Up);
        }
        assert_eq!(osk.cursor().0, 0);
    }

    #[test]
    fn test_vertical_move_clamps_column_to_shorter_row() {
        let mut osk = OnScreenKeyboard::new("");
        // The qwerty row has 10 keys; the home row below it has 9.
        osk.cursor_row = 1;
        osk.cursor_col = 9;
        osk.handle_input(InputKey::Down);
        assert_eq!(osk.cursor(), (2, 8), "column clamps to last valid key");

        // Clamp applies moving up as well: bottom row col 5 -> letter row.
        osk.cursor_row = 4;
        osk.cursor_col = 5;
        osk.handle_input(InputKey::Up);
        assert_eq!(osk.cursor(), (3, 5));
        osk.cursor_row = 0;
        osk.cursor_col = 9;
        osk.handle_input(InputKey::Up);
        assert_eq!(osk.cursor(), (4, 5), "wrap to 6-key bottom row clamps col");
    }

    #[test]
    fn test_layout_switch_reclamps_cursor() {
        let mut osk = OnScreenKeyboard::new("");
        // Bottom row of the lowercase grid, SYM key.
        osk.cursor_row = 4;
        osk.cursor_col = 1;
        osk.activate_key();
        assert!(osk.symbols_on());
        // Symbols grid has 4 rows; row clamps to 3, col stays valid.
        assert_eq!(osk.cursor(), (3, 1));
    }

    #[test]
    fn test_backspace_key() {
        let mut osk = OnScreenKeyboard::new("hello");
        osk.handle_input(InputKey::Backspace);
        assert_eq!(osk.text(), "hell");

        // Backspace on an empty buffer is a no-op, not an error.
        osk.set_text("");
        osk.handle_input(InputKey::Backspace);
        assert_eq!(osk.text(), "");
    }

    #[test]
    fn test_direct_character_input() {
        let mut osk = OnScreenKeyboard::new("");
        osk.handle_input(InputKey::Char('a'));
        osk.handle_input(InputKey::Char('b'));
        assert_eq!(osk.text(), "ab");
    }

    #[test]
    fn test_activate_printable() {
        let mut osk = OnScreenKeyboard::new("");
        osk.cursor_row = 1;
        osk.cursor_col = 0;
        osk.activate_key();
        assert_eq!(osk.text(), "q");
    }

    #[test]
    fn test_activate_space() {
        let mut osk = OnScreenKeyboard::new("test");
        osk.cursor_row = 4;
        osk.cursor_col = 2;
        osk.activate_key();
        assert_eq!(osk.text(), "test ");
    }

    #[test]
    fn test_activate_backspace_legend() {
        let mut osk = OnScreenKeyboard::new("test");
        osk.cursor_row = 4;
        osk.cursor_col = 3;
        osk.activate_key();
        assert_eq!(osk.text(), "tes");
    }

    #[test]
    fn test_shift_flips() {
        let mut osk = OnScreenKeyboard::new("");
        osk.cursor_row = 4;
        osk.cursor_col = 0;
        osk.activate_key();
        assert!(osk.shift_on());
        osk.activate_key();
        assert!(!osk.shift_on());
    }

    #[test]
    fn test_symbols_flips_and_preserves_shift() {
        let mut osk = OnScreenKeyboard::new("");
        osk.shift_on = true;
        osk.cursor_row = 4;
        osk.cursor_col = 1;
        osk.activate_key();
        assert!(osk.symbols_on());
        assert!(osk.shift_on(), "shift value kept while symbols active");

        // SYM sits at (3, 0) in the symbols grid; flipping it back restores
        // the shifted layout.
        osk.cursor_row = 3;
        osk.cursor_col = 0;
        osk.activate_key();
        assert!(!osk.symbols_on());
        assert!(osk.shift_on());
        assert_eq!(osk.current_layout()[1][0], "Q");
    }

    #[test]
    fn test_mode_flips_never_touch_buffer() {
        let mut osk = OnScreenKeyboard::new("keep");
        osk.cursor_row = 4;
        osk.cursor_col = 0;
        osk.activate_key(); // shift on
        osk.cursor_col = 1;
        osk.activate_key(); // symbols on
        assert_eq!(osk.text(), "keep");
    }

    #[test]
    fn test_shift_auto_disables_after_printable() {
        let mut osk = OnScreenKeyboard::new("");
        osk.shift_on = true;
        osk.cursor_row = 1;
        osk.cursor_col = 0;
        osk.activate_key();
        assert_eq!(osk.text(), "Q");
        assert!(!osk.shift_on());
        assert!(!osk.symbols_on(), "symbols unaffected by the activation");
    }

    #[test]
    fn test_shift_auto_disable_in_symbols_mode() {
        let mut osk = OnScreenKeyboard::new("");
        osk.shift_on = true;
        osk.symbols_on = true;
        osk.cursor_row = 0;
        osk.cursor_col = 0;
        osk.activate_key();
        assert_eq!(osk.text(), "!");
        assert!(!osk.shift_on());
        assert!(osk.symbols_on());
    }

    #[test]
    fn test_submit() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&submitted);
        let mut osk = OnScreenKeyboard::new("test")
            .on_submit(move |text| log.borrow_mut().push(text.to_string()));

        osk.cursor_row = 4;
        osk.cursor_col = 4;
        osk.activate_key();

        assert_eq!(*submitted.borrow(), vec!["test".to_string()]);
        assert_eq!(osk.text(), "test", "submit does not mutate the buffer");
    }

    #[test]
    fn test_cancel_key_and_escape() {
        let cancels = Rc::new(RefCell::new(0));
        let count = Rc::clone(&cancels);
        let mut osk = OnScreenKeyboard::new("").on_cancel(move || *count.borrow_mut() += 1);

        osk.cursor_row = 4;
        osk.cursor_col = 5;
        osk.activate_key();
        assert_eq!(*cancels.borrow(), 1);

        // Escape cancels regardless of cursor position.
        osk.cursor_row = 0;
        osk.cursor_col = 0;
        osk.handle_input(InputKey::Escape);
        assert_eq!(*cancels.borrow(), 2);
    }

    #[test]
    fn test_missing_callbacks_are_no_ops() {
        let mut osk = OnScreenKeyboard::new("text");
        osk.cursor_row = 4;
        osk.cursor_col = 4;
        osk.activate_key(); // submit with no callback
        osk.cursor_col = 5;
        osk.activate_key(); // cancel with no callback
        osk.handle_input(InputKey::Escape);
        assert_eq!(osk.text(), "text");
    }

    #[test]
    fn test_enter_activates_cursor_key_not_submit() {
        let submitted = Rc::new(RefCell::new(0));
        let count = Rc::clone(&submitted);
        let mut osk = OnScreenKeyboard::new("").on_submit(move |_| *count.borrow_mut() += 1);

        // Cursor on 'q': Activate appends instead of submitting.
        osk.cursor_row = 1;
        osk.cursor_col = 0;
        osk.handle_input(InputKey::Activate);
        assert_eq!(osk.text(), "q");
        assert_eq!(*submitted.borrow(), 0);

        osk.cursor_row = 4;
        osk.cursor_col = 4;
        osk.handle_input(InputKey::Activate);
        assert_eq!(*submitted.borrow(), 1);
    }

    #[test]
    fn test_is_action_key() {
        assert!(is_action_key(KEY_BACKSPACE));
        assert!(is_action_key(KEY_SUBMIT));
        assert!(is_action_key(KEY_SHIFT));
        assert!(is_action_key(KEY_SYMBOLS));
        assert!(is_action_key(KEY_SPACE));
        assert!(is_action_key(KEY_CANCEL));
        assert!(is_action_key("ABC"), "multi-character legends are actions");

        assert!(!is_action_key("a"));
        assert!(!is_action_key("1"));
        assert!(!is_action_key("!"));
    }
}
