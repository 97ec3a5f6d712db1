//! Engine - orchestration state shared by the TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the pollers and the
//! handles that background actions need.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use dwnldr_api::ApiClient;
use dwnldr_core::prelude::*;

use crate::actions::ActionContext;
use crate::clipboard::SystemClipboard;
use crate::config::{PreferencesStore, Settings};
use crate::message::Message;
use crate::poller::{PollerKind, Pollers};
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Orchestration engine for dwnldr.
///
/// Encapsulates:
/// - TEA state management
/// - Message channel
/// - Periodic pollers
/// - Backend client, preferences store and clipboard
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, pollers, tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Loaded settings
    pub settings: Settings,

    ctx: ActionContext,
    pollers: Pollers,
    signal_task: Option<JoinHandle<()>>,
}

impl Engine {
    /// Create an engine talking to `settings.server.url`.
    ///
    /// Loads persisted preferences and spawns the signal handler. Fails only
    /// if the server URL is invalid.
    pub fn new(settings: Settings, prefs: PreferencesStore) -> Result<Self> {
        let api = ApiClient::new(&settings.server.url, settings.request_timeout())?;
        let ctx = ActionContext {
            api,
            prefs,
            clipboard: Arc::new(SystemClipboard),
        };

        let mut engine = Self::with_context(settings, ctx);
        engine.signal_task = Some(signals::spawn_signal_handler(engine.msg_tx.clone()));
        Ok(engine)
    }

    /// Create an engine from prepared action handles (no signal handler)
    pub fn with_context(settings: Settings, ctx: ActionContext) -> Self {
        let preferences = ctx.prefs.load();
        let state = AppState::new(&settings, &preferences);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let pollers = Pollers::new(msg_tx.clone());

        info!(
            "Engine created for {} (preferences at {:?})",
            ctx.api.base_url(),
            ctx.prefs.path()
        );

        Self {
            state,
            msg_tx,
            msg_rx,
            settings,
            ctx,
            pollers,
            signal_task: None,
        }
    }

    /// Kick off the initial loads and the enabled pollers.
    ///
    /// Order: IP, files (+ poller), listener status, logs (+ poller), then
    /// the commands for the persisted OS tab.
    pub fn start(&mut self) {
        self.process_message(Message::DetectIp);

        self.process_message(Message::RefreshFiles);
        if self.state.files.auto_refresh {
            self.pollers
                .start(PollerKind::Files, self.state.files_interval);
        }

        self.process_message(Message::RefreshListenerStatus);

        self.process_message(Message::RefreshLogs);
        if self.state.logs.auto_refresh {
            self.pollers.start(PollerKind::Logs, self.state.logs_interval);
        }

        self.process_message(Message::ReloadCommands);
    }

    /// Process a single message through the TEA update loop.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.ctx,
            &mut self.pollers,
        );
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. The TUI runner drains
    /// before every render.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for external producers.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn pollers(&self) -> &Pollers {
        &self.pollers
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop pollers and the signal handler. In-flight requests are abandoned.
    pub fn shutdown(&mut self) {
        self.pollers.stop_all();
        if let Some(handle) = self.signal_task.take() {
            handle.abort();
        }
        info!("Engine shut down");
    }
}
