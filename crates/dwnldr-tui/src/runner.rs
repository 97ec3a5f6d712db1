//! TUI runner - main event loop

use dwnldr_app::Engine;
use dwnldr_core::prelude::*;

use super::{event, render, terminal};

/// Run the control panel until the user quits or a signal arrives.
///
/// The engine's initial loads and pollers are started here, after the
/// terminal has been set up.
pub async fn run(mut engine: Engine) -> Result<()> {
    let mut term = terminal::enter()?;

    engine.start();
    let result = run_loop(&mut term, &mut engine).await;

    engine.shutdown();
    terminal::leave();

    if let Err(e) = &result {
        error!("TUI loop exited with error: {}", e);
    }
    result
}

async fn run_loop(term: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Results of background requests, poller ticks, signals
        engine.drain_pending_messages();

        term.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }

        // Terminal polling blocks; let spawned requests make progress
        tokio::task::yield_now().await;
    }
    Ok(())
}
