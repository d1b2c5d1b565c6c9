//! padboard - controller-friendly TUI widget state machines.
//!
//! A small set of selection-driven widgets (on-screen keyboard, checklist,
//! single/multi selector, settings menu, button-bar focus ring) that manage
//! cursor position, selection sets, and mode transitions independently of
//! how cells are painted. Widgets consume logical [`input::InputKey`] events
//! and expose their display state as plain strings plus thin ratatui render
//! glue; the surrounding application owns the terminal, the page stack, and
//! the event loop.

pub mod input;
pub mod theme;
pub mod widgets;

pub use input::{translate, InputKey};
pub use theme::Theme;
pub use widgets::{
    CheckList, Entry, FocusRing, MenuOutcome, OnScreenKeyboard, Selector, SelectorConfig,
    SelectorMode, SettingsMenu,
};
