//! Bottom key-hint bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use dwnldr_app::{AppState, Focus, UiMode};

use crate::theme::{palette, styles};

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.state.ui_mode == UiMode::EditIp {
            return &[("Enter", "save"), ("Esc", "cancel"), ("Ctrl+C", "quit")];
        }
        match self.state.focus {
            Focus::Filename | Focus::FallbackPort => &[
                ("Tab", "next"),
                ("Ctrl+U", "clear"),
                ("Esc", "files"),
                ("Ctrl+C", "quit"),
            ],
            Focus::ListenerPort => &[
                ("Enter", "start"),
                ("Tab", "next"),
                ("Ctrl+U", "clear"),
                ("Esc", "files"),
            ],
            Focus::Files => &[
                ("↑↓", "move"),
                ("Enter", "select"),
                ("f", "refresh"),
                ("F", "auto"),
                ("i", "edit IP"),
                ("d", "detect"),
                ("x", "clear IP"),
                ("w/l", "OS"),
                ("q", "quit"),
            ],
            Focus::Commands => &[
                ("↑↓", "move"),
                ("Enter/y", "copy"),
                ("r", "reload"),
                ("o", "switch OS"),
                ("s/t", "listener"),
                ("q", "quit"),
            ],
            Focus::Logs => &[
                ("↑↓", "scroll"),
                ("g", "refresh"),
                ("G", "auto"),
                ("c", "clear"),
                ("q", "quit"),
            ],
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(palette::DEEPEST_BG));

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in self.hints().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", styles::text_muted()));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}", action), styles::text_muted()));
        }
        Line::from(spans).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_hints_follow_focus() {
        let mut term = TestTerminal::with_size(120, 1);
        let mut state = AppState::default();

        term.render_widget(StatusBar::new(&state), term.area());
        assert!(term.buffer_contains("i edit IP"));

        state.focus = Focus::Logs;
        term.render_widget(StatusBar::new(&state), term.area());
        assert!(term.buffer_contains("c clear"));
        assert!(!term.buffer_contains("edit IP"));

        state.focus = Focus::ListenerPort;
        term.render_widget(StatusBar::new(&state), term.area());
        assert!(term.buffer_contains("Enter start"));
    }

    #[test]
    fn test_editor_hints() {
        let mut term = TestTerminal::with_size(120, 1);
        let mut state = AppState::default();
        state.ui_mode = UiMode::EditIp;

        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Enter save"));
        assert!(term.buffer_contains("Esc cancel"));
    }
}
