//! Rendered command list for the active OS tab
//!
//! Groups are flattened into rows: a header row per group followed by one
//! row per item. The item under the cursor is kept inside the visible window.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use dwnldr_app::AppState;
use dwnldr_core::RenderedGroup;

use crate::theme::{palette, styles};

const COPIED: &str = " Copied!";

pub struct CommandsPanel<'a> {
    state: &'a AppState,
    focused: bool,
}

/// One display row; `item` is the flat item index for selectable rows
struct Row {
    line: Line<'static>,
    item: Option<usize>,
}

impl<'a> CommandsPanel<'a> {
    pub fn new(state: &'a AppState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled(" Commands ", styles::accent_bold()),
            Span::styled(
                format!("[{}] ", self.state.commands.os.label()),
                styles::text_secondary(),
            ),
        ];
        if self.state.commands.loading && self.state.commands.spec.is_some() {
            spans.push(Span::styled("reloading… ", styles::status_yellow()));
        }
        Line::from(spans)
    }

    fn status_rows(&self) -> Vec<Row> {
        let commands = &self.state.commands;
        let mut rows = Vec::new();

        if let Some(error) = &commands.error {
            rows.push(Row {
                line: Line::styled(
                    format!("Failed to load commands: {}", error),
                    styles::status_red(),
                ),
                item: None,
            });
        }

        match &commands.spec {
            None if commands.loading => rows.push(Row {
                line: Line::styled("Loading…", styles::text_muted()),
                item: None,
            }),
            Some(spec) if spec.is_fallback() => rows.push(Row {
                line: Line::styled(
                    format!(
                        "Using built-in commands ({})",
                        spec.error.as_deref().unwrap_or_default()
                    ),
                    styles::status_yellow(),
                ),
                item: None,
            }),
            Some(spec) if spec.item_count() == 0 => rows.push(Row {
                line: Line::styled("No commands for this OS", styles::text_muted()),
                item: None,
            }),
            _ => {}
        }
        rows
    }

    fn group_rows(&self, groups: Vec<RenderedGroup>) -> Vec<Row> {
        let commands = &self.state.commands;
        let mut rows = Vec::new();
        let mut index = 0;

        for group in groups {
            let mut header = vec![Span::styled(group.title, styles::accent_bold())];
            if let Some(tag) = group.tag {
                header.push(Span::styled(format!(" [{}]", tag), styles::text_muted()));
            }
            rows.push(Row {
                line: Line::from(header),
                item: None,
            });

            for item in group.items {
                let selected = index == commands.cursor;
                let style = match (selected, self.focused) {
                    (true, true) => styles::focused_selected(),
                    (true, false) => styles::unfocused_selected(),
                    _ => styles::text_primary(),
                };
                let marker = if selected { "▸ " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, styles::accent()),
                    Span::styled(item.text, style),
                ];
                if commands.is_flashing(&item.id) {
                    spans.push(Span::styled(COPIED, styles::status_green()));
                }
                rows.push(Row {
                    line: Line::from(spans),
                    item: Some(index),
                });
                index += 1;
            }
        }
        rows
    }
}

impl Widget for CommandsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(self.title())
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut rows = self.status_rows();
        rows.extend(self.group_rows(self.state.rendered_commands()));

        let visible = inner.height as usize;
        let cursor_row = rows
            .iter()
            .position(|row| row.item == Some(self.state.commands.cursor))
            .unwrap_or(0);
        let offset = cursor_row.saturating_sub(visible - 1);

        for (y, row) in rows.into_iter().skip(offset).take(visible).enumerate() {
            let rect = Rect {
                y: inner.y + y as u16,
                height: 1,
                ..inner
            };
            row.line.render(rect, buf);
        }
    }
}
