//! Manual IP override modal

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use dwnldr_app::AppState;

use crate::theme::styles;

const WIDTH: u16 = 44;
const HEIGHT: u16 = 7;

/// Rectangle of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct IpEditor<'a> {
    state: &'a AppState,
}

impl<'a> IpEditor<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for IpEditor<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(WIDTH, HEIGHT, area);
        Clear.render(popup, buf);

        let detected = match self.state.ip.status.detected() {
            Some(ip) => Span::styled(ip.to_string(), styles::text_secondary()),
            None => Span::styled(
                self.state.ip.status.label().to_string(),
                styles::ip_status(&self.state.ip.status),
            ),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Detected  ", styles::text_muted()),
                detected,
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled("IP  ", styles::accent_bold()),
                Span::styled(self.state.ip_editor.value(), styles::text_primary()),
                Span::styled("█", styles::accent()),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" save  ", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled(" cancel", styles::text_muted()),
            ]),
        ];

        Paragraph::new(lines)
            .block(styles::modal_block(" Manual IP "))
            .render(popup, buf);
    }
}
