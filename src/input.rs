//! Logical input events for widgets.
//!
//! Widgets consume `InputKey` values rather than raw crossterm events so the
//! state machines stay independent of the terminal backend. The host calls
//! `translate` at its event-loop boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// A logical key delivered to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    /// Enter or a designated "confirm" input; activates whatever is highlighted.
    Activate,
    Escape,
    Backspace,
    /// Direct character input from a physical keyboard.
    Char(char),
}

/// Convert a crossterm key event to a logical input key.
///
/// Only key-press events are translated; repeats and releases, and keys the
/// widgets have no use for, map to `None`.
pub fn translate(event: &KeyEvent) -> Option<InputKey> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Enter => Some(InputKey::Activate),
        KeyCode::Esc => Some(InputKey::Escape),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        _ => None,
    }
}
