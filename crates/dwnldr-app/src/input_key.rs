//! Abstract input key event, independent of terminal library.
//!
//! The key handlers in this crate work on `InputKey` so the state machine
//! can be driven from tests (and the headless runner) without crossterm.

/// Abstract input key event, independent of terminal library.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, Ctrl+u, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Tab,
    /// Shift+Tab (BackTab)
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Character typed into a text field, if this key produces one
    pub fn as_text_char(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}
