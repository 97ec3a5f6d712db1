//! File listener controls

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use dwnldr_app::state::ListenerState;

use crate::theme::{palette, styles};

pub struct ListenerPanel<'a> {
    listener: &'a ListenerState,
    focused: bool,
}

impl<'a> ListenerPanel<'a> {
    pub fn new(listener: &'a ListenerState, focused: bool) -> Self {
        Self { listener, focused }
    }

    fn port_line(&self) -> Line<'a> {
        let label_style = if self.focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        let mut spans = vec![
            Span::styled("Port    ", label_style),
            Span::styled(self.listener.port_input.value(), styles::text_primary()),
        ];
        if self.focused {
            spans.push(Span::styled("█", styles::accent()));
        }
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        let style = if self.listener.status.running {
            styles::status_green()
        } else {
            styles::status_red()
        };
        Line::from(vec![
            Span::styled("Status  ", styles::text_secondary()),
            Span::styled(self.listener.status_text(), style),
        ])
    }
}

impl Widget for ListenerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(Span::styled(" Listener ", styles::accent_bold()))
            .style(Style::default().bg(palette::CARD_BG));

        let mut lines = vec![self.port_line(), self.status_line()];
        match &self.listener.last_error {
            Some(message) => lines.push(Line::styled(message.clone(), styles::status_red())),
            None => lines.push(Line::default()),
        }
        lines.push(Line::from(vec![
            Span::styled("s", styles::keybinding()),
            Span::styled(" start  ", styles::text_muted()),
            Span::styled("t", styles::keybinding()),
            Span::styled(" stop", styles::text_muted()),
        ]));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use dwnldr_core::FileServerStatus;

    #[test]
    fn test_stopped_listener() {
        let mut term = TestTerminal::with_size(40, 7);
        let mut listener = ListenerState::new(8443);
        listener.prefill_port();

        term.render_widget(ListenerPanel::new(&listener, false), term.area());

        assert!(term.buffer_contains("Port    8443"));
        assert!(term.buffer_contains("Status  Stopped"));
    }

    #[test]
    fn test_running_listener_is_green() {
        let mut term = TestTerminal::with_size(40, 7);
        let mut listener = ListenerState::new(8443);
        listener.status = FileServerStatus::running(9000);

        term.render_widget(ListenerPanel::new(&listener, false), term.area());

        let y = term.find_line("Running on :9000").unwrap();
        let line = term.line(y);
        let x = line[..line.find("Running").unwrap()].chars().count() as u16;
        assert_eq!(term.buffer()[(x, y)].fg, palette::STATUS_GREEN);
    }

    #[test]
    fn test_start_error_is_shown() {
        let mut term = TestTerminal::with_size(40, 7);
        let mut listener = ListenerState::new(8443);
        listener.last_error = Some("Error: port in use".into());

        term.render_widget(ListenerPanel::new(&listener, true), term.area());

        assert!(term.buffer_contains("Error: port in use"));
        assert!(term.buffer_contains("█"));
    }
}
