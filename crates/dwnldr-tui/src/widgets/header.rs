//! Header bar: IP, ports and OS tabs

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use dwnldr_app::AppState;
use dwnldr_core::OsTab;

use crate::theme::{palette, styles};

/// Main header showing the effective IP, the ports in use and the OS tabs
pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn ip_spans(&self) -> Vec<Span<'a>> {
        let state: &'a AppState = self.state;
        let ip = &state.ip;
        let mut spans = vec![Span::styled("IP ", styles::text_muted())];
        if ip.is_manual() {
            spans.push(Span::styled(ip.display(), styles::accent_bold()));
            spans.push(Span::styled(" (manual)", styles::accent()));
        } else {
            spans.push(Span::styled(ip.display(), styles::ip_status(&ip.status)));
        }
        spans
    }

    fn tabs_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for os in OsTab::ALL {
            let style = if os == self.state.commands.os {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {} ", os.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans).alignment(Alignment::Right)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let separator = Span::styled("  │  ", styles::border_inactive());
        let mut spans = vec![Span::styled(" dwnldr", styles::accent_bold()), separator.clone()];
        spans.extend(self.ip_spans());
        spans.push(separator);
        spans.push(Span::styled(
            self.state.ports_info(),
            styles::text_secondary(),
        ));

        let row = Rect { height: 1, ..inner };
        self.tabs_line().render(row, buf);
        Line::from(spans).render(row, buf);
    }
}
