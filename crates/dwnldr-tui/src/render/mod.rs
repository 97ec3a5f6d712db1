//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use dwnldr_app::{AppState, Focus, UiMode};

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`: every derived value (URL, command text,
/// ports line) is recomputed from the state on each call.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);
    frame.render_widget(
        widgets::FilePicker::new(&state.files, state.focus == Focus::Files),
        areas.files,
    );
    frame.render_widget(widgets::InputsPanel::new(state), areas.inputs);
    frame.render_widget(
        widgets::ListenerPanel::new(&state.listener, state.focus == Focus::ListenerPort),
        areas.listener,
    );
    frame.render_widget(
        widgets::CommandsPanel::new(state, state.focus == Focus::Commands),
        areas.commands,
    );
    frame.render_widget(
        widgets::AccessLogTable::new(&state.logs, state.focus == Focus::Logs),
        areas.logs,
    );
    frame.render_widget(widgets::StatusBar::new(state), areas.status_bar);

    if state.ui_mode == UiMode::EditIp {
        frame.render_widget(widgets::IpEditor::new(state), area);
    }
}
