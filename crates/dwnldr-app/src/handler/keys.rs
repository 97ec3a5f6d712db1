//! Key event handlers for different UI modes

use dwnldr_core::OsTab;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Focus, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::EditIp => handle_key_edit_ip(key),
        UiMode::Normal if state.focus.is_text_input() => handle_key_text_field(state, key),
        UiMode::Normal => handle_key_normal(state, key),
    }
}

/// Handle key events in the manual IP editor
fn handle_key_edit_ip(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SaveIpOverride),
        InputKey::Esc => Some(Message::CloseIpEditor),
        InputKey::Backspace => Some(Message::IpEditorBackspace),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        key => key.as_text_char().map(Message::IpEditorInput),
    }
}

/// Handle key events while a text input has focus
fn handle_key_text_field(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::CharCtrl('u') => Some(Message::InputClear),
        InputKey::Backspace => Some(Message::InputBackspace),
        InputKey::Esc => Some(Message::SetFocus(Focus::Files)),
        InputKey::Tab => Some(Message::FocusNext),
        InputKey::BackTab => Some(Message::FocusPrev),
        InputKey::Enter if state.focus == Focus::ListenerPort => Some(Message::StartListener),
        InputKey::Enter => Some(Message::FocusNext),
        key => key.as_text_char().map(Message::InputChar),
    }
}

/// Handle key events in normal mode
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Tab => Some(Message::FocusNext),
        InputKey::BackTab => Some(Message::FocusPrev),

        // OS tabs
        InputKey::Char('w') => Some(Message::SwitchOs(OsTab::Windows)),
        InputKey::Char('l') => Some(Message::SwitchOs(OsTab::Linux)),
        InputKey::Char('o') => Some(Message::SwitchOs(state.commands.os.other())),

        // IP
        InputKey::Char('i') => Some(Message::OpenIpEditor),
        InputKey::Char('d') => Some(Message::RefreshIp),
        InputKey::Char('x') => Some(Message::ClearIpOverride),

        // Files
        InputKey::Char('f') => Some(Message::RefreshFiles),
        InputKey::Char('F') => Some(Message::ToggleFilesAutoRefresh),

        // Listener
        InputKey::Char('s') => Some(Message::StartListener),
        InputKey::Char('t') => Some(Message::StopListener),

        // Access log
        InputKey::Char('g') => Some(Message::RefreshLogs),
        InputKey::Char('G') => Some(Message::ToggleLogsAutoRefresh),
        InputKey::Char('c') => Some(Message::ClearLogs),

        // Commands
        InputKey::Char('r') => Some(Message::ReloadCommands),
        InputKey::Char('y') => Some(Message::CopySelectedCommand),

        InputKey::Enter => match state.focus {
            Focus::Files => Some(Message::ConfirmFileSelection),
            Focus::Commands => Some(Message::CopySelectedCommand),
            _ => None,
        },

        InputKey::Up | InputKey::Char('k') => match state.focus {
            Focus::Files => Some(Message::FileCursorUp),
            Focus::Commands => Some(Message::CommandCursorUp),
            Focus::Logs => Some(Message::LogsScrollUp),
            _ => None,
        },
        InputKey::Down | InputKey::Char('j') => match state.focus {
            Focus::Files => Some(Message::FileCursorDown),
            Focus::Commands => Some(Message::CommandCursorDown),
            Focus::Logs => Some(Message::LogsScrollDown),
            _ => None,
        },

        _ => None,
    }
}
