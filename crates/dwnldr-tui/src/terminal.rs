//! Terminal setup and restoration

use ratatui::DefaultTerminal;

use dwnldr_core::prelude::*;

/// Enter raw mode and the alternate screen.
///
/// Installs a panic hook first so a panic never leaves the terminal in raw
/// mode. Pair with [`leave`].
pub fn enter() -> Result<DefaultTerminal> {
    install_panic_hook();
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

pub fn leave() {
    ratatui::restore();
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}
