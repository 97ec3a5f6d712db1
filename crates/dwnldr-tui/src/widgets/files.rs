//! File picker panel

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use dwnldr_app::state::FilesState;

use crate::theme::{palette, styles};

/// List of files offered by the backend, with a placeholder row on top
pub struct FilePicker<'a> {
    files: &'a FilesState,
    focused: bool,
}

impl<'a> FilePicker<'a> {
    pub fn new(files: &'a FilesState, focused: bool) -> Self {
        Self { files, focused }
    }

    fn title(&self) -> Line<'static> {
        let auto = if self.files.auto_refresh {
            Span::styled("auto ", styles::status_green())
        } else {
            Span::styled("manual ", styles::text_muted())
        };
        Line::from(vec![Span::styled(" Files ", styles::accent_bold()), auto])
    }

    fn row_style(&self, index: usize) -> Style {
        if index != self.files.cursor {
            return styles::text_primary();
        }
        if self.focused {
            styles::focused_selected()
        } else {
            styles::unfocused_selected()
        }
    }
}

impl Widget for FilePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(self.title())
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let visible = inner.height as usize;
        let offset = self.files.cursor.saturating_sub(visible - 1);

        let placeholder = std::iter::once((self.files.placeholder(), false));
        let files = self.files.files.iter().map(|name| {
            let selected = self.files.selected.as_deref() == Some(name.as_str());
            (name.as_str(), selected)
        });

        for (row, (index, (text, selected))) in placeholder
            .chain(files)
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let style = if index == 0 && index != self.files.cursor {
                styles::text_muted()
            } else {
                self.row_style(index)
            };
            let marker = if selected { "● " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, styles::status_green()),
                Span::styled(text, style),
            ]);
            let rect = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            line.render(rect, buf);
        }
    }
}
