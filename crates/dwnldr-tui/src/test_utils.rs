//! Test utilities for TUI rendering verification
//!
//! Renders widgets and full frames into ratatui's `TestBackend` so tests can
//! assert on the resulting text.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

use dwnldr_app::state::IpStatus;
use dwnldr_app::AppState;
use dwnldr_core::{CommandGroup, CommandItem, CommandSpec};

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 120;
pub const TEST_HEIGHT: u16 = 30;

/// Wrapper around a `TestBackend` terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    /// Row `y` as text
    pub fn line(&self, y: u16) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        if y < buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
        }
        result
    }

    /// Row index of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        (0..self.buffer().area.height).find(|y| self.line(*y).contains(text))
    }

    /// All content as a string (for debugging)
    pub fn content(&self) -> String {
        (0..self.buffer().area.height)
            .map(|y| self.line(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// State with a detected IP, a filename and a two-group command spec
pub fn populated_state() -> AppState {
    let mut state = AppState::default();
    state.ip.status = IpStatus::Found("192.168.1.20".into());
    state.filename.set("setup.exe");
    state.commands.spec = Some(CommandSpec {
        groups: vec![
            CommandGroup {
                title: "PowerShell".into(),
                tag: Some("ps".into()),
                items: vec![CommandItem {
                    id: None,
                    template: "iwr {{url}} -OutFile {{filename}}".into(),
                }],
            },
            CommandGroup {
                title: String::new(),
                tag: None,
                items: vec![CommandItem {
                    id: None,
                    template: "curl.exe -O {{url}}".into(),
                }],
            },
        ],
        ..Default::default()
    });
    state
}
