//! Widget components for the TUI

mod access_log;
mod commands;
mod files;
mod header;
mod inputs;
mod ip_editor;
mod listener;
mod status_bar;

pub use access_log::AccessLogTable;
pub use commands::CommandsPanel;
pub use files::FilePicker;
pub use header::MainHeader;
pub use inputs::InputsPanel;
pub use ip_editor::{centered_rect, IpEditor};
pub use listener::ListenerPanel;
pub use status_bar::StatusBar;
