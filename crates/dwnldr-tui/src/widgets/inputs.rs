//! Filename, fallback port and the resulting download URL

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use dwnldr_app::state::TextField;
use dwnldr_app::{AppState, Focus};

use crate::theme::{palette, styles};

const LABEL_WIDTH: usize = 10;
const CURSOR: &str = "█";

pub struct InputsPanel<'a> {
    state: &'a AppState,
}

impl<'a> InputsPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn field_line(
        &self,
        label: &'static str,
        field: &'a TextField,
        focus: Focus,
        hint: String,
    ) -> Line<'a> {
        let focused = self.state.focus == focus;
        let label_style = if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };

        let mut spans = vec![Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            label_style,
        )];
        if field.is_empty() && !focused {
            spans.push(Span::styled(hint, styles::text_muted()));
        } else {
            spans.push(Span::styled(field.value(), styles::text_primary()));
        }
        if focused {
            spans.push(Span::styled(CURSOR, styles::accent()));
        }
        Line::from(spans)
    }

    fn url_line(&self) -> Line<'static> {
        let url = self.state.download_url();
        let value = if url.is_empty() {
            Span::styled("(needs IP and file)", styles::text_muted())
        } else {
            Span::styled(url, styles::accent())
        };
        Line::from(vec![
            Span::styled(
                format!("{:<width$}", "URL", width = LABEL_WIDTH),
                styles::text_secondary(),
            ),
            value,
        ])
    }
}

impl Widget for InputsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = matches!(self.state.focus, Focus::Filename | Focus::FallbackPort);
        let block = styles::glass_block(focused)
            .title(Span::styled(" Download ", styles::accent_bold()))
            .style(Style::default().bg(palette::CARD_BG));

        let filename_hint = match &self.state.files.selected {
            Some(name) => name.clone(),
            None => "(pick a file)".to_string(),
        };
        let port_hint = "(listener or UI port)".to_string();

        let lines = vec![
            self.field_line(
                "Filename",
                &self.state.filename,
                Focus::Filename,
                filename_hint,
            ),
            self.field_line(
                "Fallback",
                &self.state.fallback_port,
                Focus::FallbackPort,
                port_hint,
            ),
            Line::default(),
            self.url_line(),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
