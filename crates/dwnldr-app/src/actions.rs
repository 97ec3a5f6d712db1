//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every network call runs in its own task and reports back with a result
//! message. Tasks never touch state; the update function applies results in
//! arrival order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use dwnldr_api::ApiClient;
use dwnldr_core::Error;

use crate::clipboard::Clipboard;
use crate::config::PreferencesStore;
use crate::message::Message;
use crate::poller::Pollers;
use crate::UpdateAction;

/// Long-lived handles the actions need
#[derive(Clone)]
pub struct ActionContext {
    pub api: ApiClient,
    pub prefs: PreferencesStore,
    pub clipboard: Arc<dyn Clipboard>,
}

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    ctx: &ActionContext,
    pollers: &mut Pollers,
) {
    match action {
        UpdateAction::DetectIp => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.detect_ip().await {
                    Ok(ip) => Message::IpDetected { ip },
                    Err(e) => Message::IpDetectFailed {
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::ReloadOverride => {
            let store = ctx.prefs.clone();
            tokio::spawn(async move {
                let manual_override = tokio::task::spawn_blocking(move || store.load_settled())
                    .await
                    .map(|prefs| prefs.manual_ip_override)
                    .unwrap_or_else(|e| {
                        warn!("Preferences reload task failed: {}", e);
                        None
                    });
                let _ = msg_tx
                    .send(Message::OverrideReloaded { manual_override })
                    .await;
            });
        }

        UpdateAction::SavePreferences(prefs) => {
            let store = ctx.prefs.clone();
            // Ordered by dispatch; the blocking tasks may run in any order
            let ticket = store.ticket();
            tokio::task::spawn_blocking(move || {
                if let Err(e) = store.save_ordered(ticket, &prefs) {
                    warn!("Failed to save preferences: {}", e);
                }
            });
        }

        UpdateAction::LoadFiles => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.list_files().await {
                    Ok(list) => Message::FilesLoaded { list },
                    Err(e) => Message::FilesLoadFailed {
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::FetchListenerStatus => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.listener_status().await {
                    Ok(status) => Message::ListenerStatusUpdated { status },
                    Err(e) => Message::ListenerStatusFailed {
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::StartListener { port } => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.start_listener(port).await {
                    Ok(()) => Message::ListenerStarted,
                    Err(e) => Message::ListenerStartFailed {
                        error: start_error_text(&e),
                    },
                }
            });
        }

        UpdateAction::StopListener => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.stop_listener().await {
                    Ok(()) => Message::ListenerStopped,
                    Err(e) => Message::ListenerStopFailed {
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::LoadLogs { limit } => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.fetch_logs(limit).await {
                    Ok(entries) => Message::LogsLoaded { entries },
                    Err(e) => Message::LogsLoadFailed {
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::ClearLogs => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.clear_logs().await {
                    Ok(()) => Message::LogsCleared,
                    Err(e) => Message::LogsClearFailed {
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::LoadCommands { os } => {
            let api = ctx.api.clone();
            spawn_request(msg_tx, async move {
                match api.fetch_commands(os).await {
                    Ok(spec) => Message::CommandsLoaded { os, spec },
                    Err(e) => Message::CommandsLoadFailed {
                        os,
                        error: e.to_string(),
                    },
                }
            });
        }

        UpdateAction::CopyToClipboard { id, text } => {
            let clipboard = ctx.clipboard.clone();
            tokio::spawn(async move {
                let copied = tokio::task::spawn_blocking(move || clipboard.set_text(&text)).await;
                match copied {
                    Ok(Ok(())) => {
                        let _ = msg_tx.send(Message::CommandCopied { id }).await;
                    }
                    // No feedback on failure
                    Ok(Err(e)) => debug!("Clipboard write failed: {}", e),
                    Err(e) => debug!("Clipboard task failed: {}", e),
                }
            });
        }

        UpdateAction::ExpireCopyFlash { generation, after } => {
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                let _ = msg_tx.send(Message::CopyFlashExpired { generation }).await;
            });
        }

        UpdateAction::StartPoller { kind, interval } => pollers.start(kind, interval),

        UpdateAction::StopPoller { kind } => pollers.stop(kind),
    }
}

/// Run a request and post its result message
fn spawn_request<F>(msg_tx: mpsc::Sender<Message>, request: F)
where
    F: std::future::Future<Output = Message> + Send + 'static,
{
    tokio::spawn(async move {
        let msg = request.await;
        if msg_tx.send(msg).await.is_err() {
            debug!("Message channel closed, dropping API result");
        }
    });
}

/// Server-provided error text, or "failed"
fn start_error_text(error: &Error) -> String {
    error.api_message().unwrap_or("failed").to_string()
}
