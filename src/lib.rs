//! dwnldr Library
//!
//! Entry points for the interactive control panel and the one-shot
//! `commands` mode.

pub mod headless;

use dwnldr_app::config::{PreferencesStore, Settings};
use dwnldr_app::Engine;
use dwnldr_core::prelude::*;

pub use headless::run_commands;

/// Run the interactive control panel against `settings.server.url`
pub async fn run(settings: Settings) -> Result<()> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since TUI owns stdout)
    dwnldr_core::logging::init()?;
    info!("Backend: {}", settings.server.url);

    let engine = Engine::new(settings, PreferencesStore::default_location())
        .context("Failed to create engine")?;
    let result = dwnldr_tui::run(engine).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
        if let Ok(dir) = dwnldr_core::logging::log_directory() {
            eprintln!("dwnldr exited with an error, logs in {}", dir.display());
        }
    }

    info!("dwnldr exiting");
    result
}
