//! Main update function - handles state transitions (TEA pattern)

use dwnldr_core::{render_item, OsTab};
use tracing::{debug, warn};

use crate::message::Message;
use crate::poller::PollerKind;
use crate::state::{AppState, CopyFlash, IpStatus, LogsView, UiMode};

use super::{keys::handle_key, UpdateAction, UpdateResult, COPY_FLASH_DURATION};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        Message::PollTick(kind) => handle_poll_tick(state, kind),

        // ─────────────────────────────────────────────────────────
        // Focus & Text Inputs
        // ─────────────────────────────────────────────────────────
        Message::FocusNext => {
            state.focus = state.focus.next();
            UpdateResult::none()
        }
        Message::FocusPrev => {
            state.focus = state.focus.prev();
            UpdateResult::none()
        }
        Message::SetFocus(focus) => {
            state.focus = focus;
            UpdateResult::none()
        }
        Message::InputChar(c) => {
            if let Some(field) = state.focused_field_mut() {
                field.insert(c);
            }
            UpdateResult::none()
        }
        Message::InputBackspace => {
            if let Some(field) = state.focused_field_mut() {
                field.backspace();
            }
            UpdateResult::none()
        }
        Message::InputClear => {
            if let Some(field) = state.focused_field_mut() {
                field.clear();
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // IP Resolver
        // ─────────────────────────────────────────────────────────
        Message::DetectIp => {
            if state.ip.is_manual() {
                debug!("Manual IP override set, skipping detection");
                return UpdateResult::none();
            }
            state.ip.status = IpStatus::Detecting;
            UpdateResult::action(UpdateAction::DetectIp)
        }

        Message::IpDetected { ip } => {
            state.ip.status = match ip {
                Some(ip) => IpStatus::Found(ip),
                None => IpStatus::NotFound,
            };
            UpdateResult::none()
        }

        Message::IpDetectFailed { error } => {
            warn!("IP detection failed: {}", error);
            state.ip.status = IpStatus::Error;
            UpdateResult::none()
        }

        Message::RefreshIp => UpdateResult::action(UpdateAction::ReloadOverride),

        Message::OverrideReloaded { manual_override } => {
            state.ip.manual_override = manual_override;
            UpdateResult::message(Message::DetectIp)
        }

        Message::OpenIpEditor => {
            let prefill = state.ip.editor_prefill().to_string();
            state.ip_editor.set(&prefill);
            state.ui_mode = UiMode::EditIp;
            UpdateResult::none()
        }

        Message::CloseIpEditor => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }

        Message::IpEditorInput(c) => {
            state.ip_editor.insert(c);
            UpdateResult::none()
        }

        Message::IpEditorBackspace => {
            state.ip_editor.backspace();
            UpdateResult::none()
        }

        Message::SaveIpOverride => {
            let value = state.ip_editor.value().trim().to_string();
            if value.is_empty() {
                return UpdateResult::none();
            }
            state.ip.manual_override = Some(value);
            state.ui_mode = UiMode::Normal;
            UpdateResult::action(UpdateAction::SavePreferences(state.preferences()))
        }

        Message::ClearIpOverride => {
            state.ip.manual_override = None;
            state.ui_mode = UiMode::Normal;
            UpdateResult::action_then(
                UpdateAction::SavePreferences(state.preferences()),
                Message::DetectIp,
            )
        }

        // ─────────────────────────────────────────────────────────
        // File Picker
        // ─────────────────────────────────────────────────────────
        Message::RefreshFiles => UpdateResult::action(UpdateAction::LoadFiles),

        Message::FilesLoaded { list } => {
            if let Some(base) = list.download_base() {
                state.serving.set_base_path(&base);
            }
            state.files.replace(list.files, list.root);
            UpdateResult::none()
        }

        Message::FilesLoadFailed { error } => {
            warn!("Failed to load files: {}", error);
            state.files.fail();
            UpdateResult::none()
        }

        Message::FileCursorUp => {
            state.files.cursor_up();
            UpdateResult::none()
        }

        Message::FileCursorDown => {
            state.files.cursor_down();
            UpdateResult::none()
        }

        Message::ConfirmFileSelection => {
            let picked = state.files.highlighted().map(String::from);
            state.filename.set(picked.as_deref().unwrap_or(""));
            state.files.selected = picked;
            UpdateResult::none()
        }

        Message::ToggleFilesAutoRefresh => {
            state.files.auto_refresh = !state.files.auto_refresh;
            UpdateResult::action(poller_action(
                PollerKind::Files,
                state.files.auto_refresh,
                state.files_interval,
            ))
        }

        // ─────────────────────────────────────────────────────────
        // File Listener
        // ─────────────────────────────────────────────────────────
        Message::RefreshListenerStatus => UpdateResult::action(UpdateAction::FetchListenerStatus),

        Message::ListenerStatusUpdated { status } => {
            state.listener.status = status;
            state.listener.prefill_port();
            UpdateResult::none()
        }

        Message::ListenerStatusFailed { error } => {
            debug!("Listener status unavailable: {}", error);
            state.listener.status = dwnldr_core::FileServerStatus::stopped();
            state.listener.prefill_port();
            UpdateResult::none()
        }

        Message::StartListener => {
            state.listener.last_error = None;
            let port = state.listener.requested_port();
            UpdateResult::action(UpdateAction::StartListener { port })
        }

        Message::ListenerStarted => after_start(state),

        Message::ListenerStartFailed { error } => {
            warn!("Failed to start file listener: {}", error);
            state.listener.last_error = Some(format!("Error: {}", error));
            after_start(state)
        }

        Message::StopListener => {
            state.listener.last_error = None;
            UpdateResult::action(UpdateAction::StopListener)
        }

        Message::ListenerStopped => UpdateResult::message(Message::RefreshListenerStatus),

        Message::ListenerStopFailed { error } => {
            warn!("Failed to stop file listener: {}", error);
            UpdateResult::message(Message::RefreshListenerStatus)
        }

        // ─────────────────────────────────────────────────────────
        // Access Log
        // ─────────────────────────────────────────────────────────
        Message::RefreshLogs => UpdateResult::action(UpdateAction::LoadLogs {
            limit: state.log_limit,
        }),

        Message::LogsLoaded { entries } => {
            state.logs.replace(entries);
            UpdateResult::none()
        }

        Message::LogsLoadFailed { error } => {
            debug!("Failed to load access log: {}", error);
            state.logs.view = LogsView::Error;
            state.logs.scroll = 0;
            UpdateResult::none()
        }

        Message::ToggleLogsAutoRefresh => {
            state.logs.auto_refresh = !state.logs.auto_refresh;
            UpdateResult::action(poller_action(
                PollerKind::Logs,
                state.logs.auto_refresh,
                state.logs_interval,
            ))
        }

        Message::ClearLogs => UpdateResult::action(UpdateAction::ClearLogs),

        Message::LogsCleared => UpdateResult::message(Message::RefreshLogs),

        Message::LogsClearFailed { error } => {
            warn!("Failed to clear access log: {}", error);
            UpdateResult::message(Message::RefreshLogs)
        }

        Message::LogsScrollUp => {
            state.logs.scroll_up();
            UpdateResult::none()
        }

        Message::LogsScrollDown => {
            state.logs.scroll_down();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Commands
        // ─────────────────────────────────────────────────────────
        Message::SwitchOs(os) => {
            let commands = &mut state.commands;
            commands.os = os;
            commands.spec = None;
            commands.error = None;
            commands.cursor = 0;
            commands.flash = None;
            UpdateResult::action_then(
                UpdateAction::SavePreferences(state.preferences()),
                Message::ReloadCommands,
            )
        }

        Message::ReloadCommands => {
            state.commands.loading = true;
            UpdateResult::action(UpdateAction::LoadCommands {
                os: state.commands.os,
            })
        }

        Message::CommandsLoaded { os, spec } => {
            if is_stale(state, os) {
                return UpdateResult::none();
            }
            if let Some(error) = &spec.error {
                warn!(
                    "Backend served fallback {} commands ({}): {}",
                    os,
                    spec.path.as_deref().unwrap_or("unknown path"),
                    error
                );
            }
            let commands = &mut state.commands;
            commands.loading = false;
            commands.error = None;
            commands.cursor = commands.cursor.min(spec.item_count().saturating_sub(1));
            // Flash ids index into the spec being replaced
            commands.flash = None;
            commands.spec = Some(spec);
            UpdateResult::none()
        }

        Message::CommandsLoadFailed { os, error } => {
            if is_stale(state, os) {
                return UpdateResult::none();
            }
            warn!("Failed to load {} commands: {}", os, error);
            let commands = &mut state.commands;
            commands.loading = false;
            commands.spec = None;
            commands.cursor = 0;
            commands.error = Some(error);
            UpdateResult::none()
        }

        Message::CommandCursorUp => {
            state.commands.cursor_up();
            UpdateResult::none()
        }

        Message::CommandCursorDown => {
            state.commands.cursor_down();
            UpdateResult::none()
        }

        Message::CopySelectedCommand => {
            let Some(spec) = state.commands.spec.as_ref() else {
                return UpdateResult::none();
            };
            let Some(id) = state.commands.selected_id() else {
                return UpdateResult::none();
            };
            match render_item(spec, &id, &state.template_vars()) {
                Some(text) => UpdateResult::action(UpdateAction::CopyToClipboard { id, text }),
                None => UpdateResult::none(),
            }
        }

        Message::CommandCopied { id } => {
            let commands = &mut state.commands;
            commands.flash_generation += 1;
            let generation = commands.flash_generation;
            commands.flash = Some(CopyFlash { id, generation });
            UpdateResult::action(UpdateAction::ExpireCopyFlash {
                generation,
                after: COPY_FLASH_DURATION,
            })
        }

        Message::CopyFlashExpired { generation } => {
            if state
                .commands
                .flash
                .as_ref()
                .is_some_and(|flash| flash.generation == generation)
            {
                state.commands.flash = None;
            }
            UpdateResult::none()
        }
    }
}

fn handle_poll_tick(state: &AppState, kind: PollerKind) -> UpdateResult {
    match kind {
        PollerKind::Files if state.files.auto_refresh => {
            UpdateResult::message(Message::RefreshFiles)
        }
        PollerKind::Logs if state.logs.auto_refresh => UpdateResult::message(Message::RefreshLogs),
        _ => UpdateResult::none(),
    }
}

fn poller_action(
    kind: PollerKind,
    enabled: bool,
    interval: std::time::Duration,
) -> UpdateAction {
    if enabled {
        UpdateAction::StartPoller { kind, interval }
    } else {
        UpdateAction::StopPoller { kind }
    }
}

/// Re-poll status and logs after a start attempt, whatever its outcome
fn after_start(state: &AppState) -> UpdateResult {
    UpdateResult::action_then(
        UpdateAction::LoadLogs {
            limit: state.log_limit,
        },
        Message::RefreshListenerStatus,
    )
}

/// Responses for a tab that is no longer shown are dropped
fn is_stale(state: &AppState, os: OsTab) -> bool {
    if os != state.commands.os {
        debug!(
            "Dropping {} commands, current tab is {}",
            os, state.commands.os
        );
        return true;
    }
    false
}
