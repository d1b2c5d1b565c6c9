//! Interactive widget state machines.
//!
//! Each widget owns its navigable entries, cursor/selection state, and any
//! registered callbacks, and is driven entirely by [`InputKey`] events. None
//! of them paint; they compute display strings (and thin ratatui render glue)
//! for the host to draw.
//!
//! [`InputKey`]: crate::input::InputKey

pub mod checklist;
pub mod focus_ring;
pub mod osk;
pub mod selector;
pub mod settings_menu;

pub use checklist::CheckList;
pub use focus_ring::FocusRing;
pub use osk::OnScreenKeyboard;
pub use selector::{Selector, SelectorConfig, SelectorMode};
pub use settings_menu::{MenuOutcome, SettingsMenu};

/// A selectable item pairing display text with its selection identity.
///
/// Multiple entries may share a label; values used for selection lookup
/// should be unique, since duplicates collapse under set membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub value: String,
}

impl Entry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// An entry whose value doubles as its label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
        }
    }
}
