//! Screen layout definitions for the TUI
//!
//! Header on top, a row of three short panels (files, inputs, listener),
//! commands and access log side by side below, and a one-line status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the files / inputs / listener row
const TOP_ROW_HEIGHT: u16 = 7;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// IP, ports and OS tabs
    pub header: Rect,
    pub files: Rect,
    /// Filename, fallback port and download URL
    pub inputs: Rect,
    pub listener: Rect,
    pub commands: Rect,
    pub logs: Rect,
    pub status_bar: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3),              // Header (glass container)
        Constraint::Length(TOP_ROW_HEIGHT), // Files | Inputs | Listener
        Constraint::Min(4),                 // Commands | Access log
        Constraint::Length(1),              // Status bar
    ])
    .split(area);

    let top = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ])
    .split(rows[1]);

    let bottom =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(rows[2]);

    ScreenAreas {
        header: rows[0],
        files: top[0],
        inputs: top[1],
        listener: top[2],
        commands: bottom[0],
        logs: bottom[1],
        status_bar: rows[3],
    }
}
