//! Access log table

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Widget},
};

use dwnldr_app::state::{LogsState, LogsView};
use dwnldr_core::AccessLogEntry;

use crate::theme::{palette, styles};

const COLUMNS: [&str; 6] = ["Time", "Client", "Method", "Path", "Code", "UA"];

pub struct AccessLogTable<'a> {
    logs: &'a LogsState,
    focused: bool,
}

impl<'a> AccessLogTable<'a> {
    pub fn new(logs: &'a LogsState, focused: bool) -> Self {
        Self { logs, focused }
    }

    fn title(&self) -> Line<'static> {
        let auto = if self.logs.auto_refresh {
            Span::styled("auto ", styles::status_green())
        } else {
            Span::styled("manual ", styles::text_muted())
        };
        let mut spans = vec![Span::styled(" Access log ", styles::accent_bold()), auto];
        let count = self.logs.entries().len();
        if count > 0 {
            spans.push(Span::styled(
                format!("{} rows ", count),
                styles::text_secondary(),
            ));
        }
        Line::from(spans)
    }

    fn entry_row(entry: &AccessLogEntry) -> Row<'static> {
        Row::new(vec![
            Cell::from(entry.time.clone()).style(styles::text_secondary()),
            Cell::from(entry.client.clone()),
            Cell::from(entry.method.clone()).style(styles::accent()),
            Cell::from(entry.path.clone()),
            Cell::from(entry.code_text()).style(styles::code_class(entry.code_class())),
            Cell::from(entry.ua.clone().unwrap_or_default()).style(styles::text_muted()),
        ])
        .style(styles::text_primary())
    }
}

impl Widget for AccessLogTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(self.title())
            .style(Style::default().bg(palette::CARD_BG));

        let message = match &self.logs.view {
            LogsView::Loading => Some(("Loading…", styles::text_muted())),
            LogsView::NoData => Some(("No data", styles::text_muted())),
            LogsView::Error => Some(("Error loading", styles::status_red())),
            LogsView::Entries(_) => None,
        };
        if let Some((text, style)) = message {
            Paragraph::new(Line::styled(text, style))
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(COLUMNS.map(Cell::from)).style(
            Style::default()
                .fg(palette::TEXT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .logs
            .entries()
            .iter()
            .skip(self.logs.scroll)
            .map(Self::entry_row);

        let widths = [
            Constraint::Length(19),
            Constraint::Length(15),
            Constraint::Length(6),
            Constraint::Fill(2),
            Constraint::Length(4),
            Constraint::Fill(1),
        ];

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use dwnldr_core::LogCode;

    fn entry(path: &str, code: LogCode) -> AccessLogEntry {
        AccessLogEntry {
            time: "2024-05-01 10:00:00".into(),
            client: "192.168.1.30".into(),
            method: "GET".into(),
            path: path.into(),
            code: Some(code),
            ua: Some("curl/8.5".into()),
        }
    }

    fn with_entries(entries: Vec<AccessLogEntry>) -> LogsState {
        let mut logs = LogsState::default();
        logs.replace(entries);
        logs
    }

    #[test]
    fn test_rows_and_header() {
        let mut term = TestTerminal::with_size(100, 8);
        let logs = with_entries(vec![entry("/setup.exe", LogCode::Number(200))]);

        term.render_widget(AccessLogTable::new(&logs, false), term.area());

        assert!(term.buffer_contains("Time"));
        assert!(term.buffer_contains("Method"));
        assert!(term.buffer_contains("192.168.1.30"));
        assert!(term.buffer_contains("/setup.exe"));
        assert!(term.buffer_contains("curl/8.5"));
        assert!(term.buffer_contains("1 rows"));
    }

    #[test]
    fn test_code_is_colored_by_class() {
        let mut term = TestTerminal::with_size(100, 8);
        let logs = with_entries(vec![
            entry("/missing", LogCode::Number(404)),
            entry("/aborted", LogCode::Text("-".into())),
        ]);

        term.render_widget(AccessLogTable::new(&logs, false), term.area());

        let y = term.find_line("/missing").unwrap();
        let line = term.line(y);
        let x = line[..line.find("404").unwrap()].chars().count() as u16;
        assert_eq!(term.buffer()[(x, y)].fg, palette::CODE_4XX);

        let y = term.find_line("/aborted").unwrap();
        let line = term.line(y);
        let x = line[..line.find(" - ").unwrap()].chars().count() as u16 + 1;
        assert_eq!(term.buffer()[(x, y)].fg, palette::TEXT_MUTED);
    }

    #[test]
    fn test_status_messages() {
        let mut term = TestTerminal::with_size(60, 6);
        let mut logs = LogsState::default();
        term.render_widget(AccessLogTable::new(&logs, false), term.area());
        assert!(term.buffer_contains("Loading…"));

        logs.replace(Vec::new());
        term.render_widget(AccessLogTable::new(&logs, false), term.area());
        assert!(term.buffer_contains("No data"));

        logs.view = LogsView::Error;
        term.render_widget(AccessLogTable::new(&logs, false), term.area());
        assert!(term.buffer_contains("Error loading"));
    }

    #[test]
    fn test_scroll_skips_rows() {
        let mut term = TestTerminal::with_size(100, 8);
        let mut logs = with_entries(vec![
            entry("/first", LogCode::Number(200)),
            entry("/second", LogCode::Number(200)),
        ]);
        logs.scroll_down();

        term.render_widget(AccessLogTable::new(&logs, true), term.area());

        assert!(!term.buffer_contains("/first"));
        assert!(term.buffer_contains("/second"));
    }
}
