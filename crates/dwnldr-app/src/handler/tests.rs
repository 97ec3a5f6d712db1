//! Tests for the update function and key handling

use std::time::Duration;

use dwnldr_api::FileList;
use dwnldr_core::{
    AccessLogEntry, CommandGroup, CommandItem, CommandSpec, FileServerStatus, LogCode, OsTab,
};

use super::*;
use crate::input_key::InputKey;
use crate::state::{AppState, Focus, IpStatus, LoadState, LogsView, UiMode};

fn test_state() -> AppState {
    AppState::default()
}

fn spec(templates: &[&str]) -> CommandSpec {
    CommandSpec {
        groups: vec![CommandGroup {
            title: "Download".into(),
            tag: Some("curl".into()),
            items: templates
                .iter()
                .map(|t| CommandItem {
                    id: None,
                    template: t.to_string(),
                })
                .collect(),
        }],
        ..Default::default()
    }
}

fn entry(code: i64) -> AccessLogEntry {
    AccessLogEntry {
        time: "12:00:00".into(),
        client: "10.0.0.2".into(),
        method: "GET".into(),
        path: "/a.txt".into(),
        code: Some(LogCode::Number(code)),
        ua: None,
    }
}

/// Run a message and every follow-up message, collecting the actions
fn run(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        actions.extend(result.action);
        msg = result.message;
    }
    actions
}

fn key(state: &mut AppState, key: InputKey) -> Vec<UpdateAction> {
    run(state, Message::Key(key))
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        key(state, InputKey::Char(c));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IP resolver
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_detect_ip_sets_detecting() {
    let mut state = test_state();
    let actions = run(&mut state, Message::DetectIp);
    assert_eq!(actions, vec![UpdateAction::DetectIp]);
    assert_eq!(state.ip.status, IpStatus::Detecting);

    run(
        &mut state,
        Message::IpDetected {
            ip: Some("192.168.1.7".into()),
        },
    );
    assert_eq!(state.ip.effective(), "192.168.1.7");
}

#[test]
fn test_detect_ip_not_found_and_error() {
    let mut state = test_state();
    run(&mut state, Message::IpDetected { ip: None });
    assert_eq!(state.ip.display(), "not found");
    assert_eq!(state.ip.effective(), "");

    run(
        &mut state,
        Message::IpDetectFailed {
            error: "timeout".into(),
        },
    );
    assert_eq!(state.ip.display(), "error");
    assert_eq!(state.ip.effective(), "");
}

#[test]
fn test_manual_override_skips_detection() {
    let mut state = test_state();
    state.ip.manual_override = Some("10.0.0.9".into());

    assert!(run(&mut state, Message::DetectIp).is_empty());
    assert_eq!(state.ip.status, IpStatus::Idle);
}

#[test]
fn test_refresh_ip_rereads_override_then_detects() {
    let mut state = test_state();
    state.ip.manual_override = Some("10.0.0.9".into());

    assert_eq!(
        run(&mut state, Message::RefreshIp),
        vec![UpdateAction::ReloadOverride]
    );

    let actions = run(
        &mut state,
        Message::OverrideReloaded {
            manual_override: None,
        },
    );
    assert_eq!(actions, vec![UpdateAction::DetectIp]);
    assert!(!state.ip.is_manual());
}

#[test]
fn test_ip_editor_prefill_and_save() {
    let mut state = test_state();
    state.ip.status = IpStatus::Found("192.168.1.7".into());

    key(&mut state, InputKey::Char('i'));
    assert_eq!(state.ui_mode, UiMode::EditIp);
    assert_eq!(state.ip_editor.value(), "192.168.1.7");

    // Letters typed in the editor never trigger shortcuts
    key(&mut state, InputKey::Char('q'));
    assert!(!state.should_quit());
    key(&mut state, InputKey::Backspace);
    assert_eq!(state.ip_editor.value(), "192.168.1.7");

    key(&mut state, InputKey::Backspace);
    type_text(&mut state, "50");
    let actions = key(&mut state, InputKey::Enter);

    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(state.ip.manual_override.as_deref(), Some("192.168.1.50"));
    assert_eq!(
        actions,
        vec![UpdateAction::SavePreferences(state.preferences())]
    );
}

#[test]
fn test_ip_editor_prefill_never_uses_status_text() {
    let mut state = test_state();
    state.ip.status = IpStatus::NotFound;
    run(&mut state, Message::OpenIpEditor);
    assert_eq!(state.ip_editor.value(), "");
}

#[test]
fn test_saving_empty_override_is_ignored() {
    let mut state = test_state();
    run(&mut state, Message::OpenIpEditor);
    type_text(&mut state, "   ");

    let actions = run(&mut state, Message::SaveIpOverride);
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::EditIp);
    assert_eq!(state.ip.manual_override, None);

    key(&mut state, InputKey::Esc);
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_clear_override_saves_and_redetects() {
    let mut state = test_state();
    state.ip.manual_override = Some("10.0.0.9".into());

    let actions = run(&mut state, Message::ClearIpOverride);

    assert_eq!(state.ip.manual_override, None);
    assert_eq!(
        actions,
        vec![
            UpdateAction::SavePreferences(state.preferences()),
            UpdateAction::DetectIp,
        ]
    );
    assert_eq!(state.ip.status, IpStatus::Detecting);
}

// ─────────────────────────────────────────────────────────────────────────────
// File picker
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_files_loaded_updates_base_path() {
    let mut state = test_state();
    run(
        &mut state,
        Message::FilesLoaded {
            list: FileList {
                files: vec!["a.txt".into()],
                root: Some("/data".into()),
                serving: Some(true),
                prefix: Some("/dl".into()),
            },
        },
    );
    assert_eq!(state.files.load, LoadState::Loaded);
    assert_eq!(state.serving.base_path(), "/dl/");

    run(
        &mut state,
        Message::FilesLoaded {
            list: FileList {
                files: vec![],
                serving: Some(false),
                ..Default::default()
            },
        },
    );
    assert_eq!(state.serving.base_path(), "/");
    assert_eq!(state.files.placeholder(), "(no files found)");
}

#[test]
fn test_confirm_file_fills_filename() {
    let mut state = test_state();
    state.ip.status = IpStatus::Found("10.0.0.5".into());
    run(
        &mut state,
        Message::FilesLoaded {
            list: FileList {
                files: vec!["a b.txt".into(), "c.iso".into()],
                ..Default::default()
            },
        },
    );

    key(&mut state, InputKey::Down);
    key(&mut state, InputKey::Enter);

    assert_eq!(state.files.selected.as_deref(), Some("a b.txt"));
    assert_eq!(state.filename.value(), "a b.txt");
    assert_eq!(state.download_url(), "http://10.0.0.5:3000/files/a%20b.txt");

    // Back on the placeholder row clears the pick
    key(&mut state, InputKey::Up);
    key(&mut state, InputKey::Enter);
    assert_eq!(state.files.selected, None);
    assert_eq!(state.filename.value(), "");
}

#[test]
fn test_files_load_failure() {
    let mut state = test_state();
    run(
        &mut state,
        Message::FilesLoaded {
            list: FileList {
                files: vec!["a.txt".into()],
                ..Default::default()
            },
        },
    );
    run(
        &mut state,
        Message::FilesLoadFailed {
            error: "connection refused".into(),
        },
    );
    assert!(state.files.files.is_empty());
    assert_eq!(state.files.placeholder(), "(error loading)");
}

#[test]
fn test_file_poll_tick_respects_toggle() {
    let mut state = test_state();
    assert!(state.files.auto_refresh);
    assert_eq!(
        run(&mut state, Message::PollTick(PollerKind::Files)),
        vec![UpdateAction::LoadFiles]
    );

    let actions = key(&mut state, InputKey::Char('F'));
    assert_eq!(
        actions,
        vec![UpdateAction::StopPoller {
            kind: PollerKind::Files
        }]
    );
    assert!(run(&mut state, Message::PollTick(PollerKind::Files)).is_empty());

    let actions = key(&mut state, InputKey::Char('F'));
    assert_eq!(
        actions,
        vec![UpdateAction::StartPoller {
            kind: PollerKind::Files,
            interval: Duration::from_secs(5),
        }]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// File listener
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_status_poll_prefills_port_input() {
    let mut state = test_state();
    run(
        &mut state,
        Message::ListenerStatusUpdated {
            status: FileServerStatus::running(9001),
        },
    );
    assert_eq!(state.listener.port_input.value(), "9001");
    assert_eq!(state.listener.status_text(), "Running on :9001");
    assert_eq!(state.ports_info(), "UI:3000  |  Files:9001");
}

#[test]
fn test_status_failure_means_stopped() {
    let mut state = test_state();
    state.listener.status = FileServerStatus::running(9001);
    run(
        &mut state,
        Message::ListenerStatusFailed {
            error: "refused".into(),
        },
    );
    assert!(!state.listener.status.running);
    assert_eq!(state.listener.status_text(), "Stopped");
    assert_eq!(state.ports_info(), "UI:3000");
}

#[test]
fn test_start_listener_uses_clamped_input() {
    let mut state = test_state();
    state.listener.port_input.set("70000");
    assert_eq!(
        run(&mut state, Message::StartListener),
        vec![UpdateAction::StartListener { port: 65535 }]
    );

    state.listener.port_input.clear();
    assert_eq!(
        run(&mut state, Message::StartListener),
        vec![UpdateAction::StartListener { port: 8443 }]
    );
}

#[test]
fn test_enter_in_listener_port_starts() {
    let mut state = test_state();
    run(&mut state, Message::SetFocus(Focus::ListenerPort));
    type_text(&mut state, "9000");
    let actions = key(&mut state, InputKey::Enter);
    assert_eq!(actions, vec![UpdateAction::StartListener { port: 9000 }]);
}

#[test]
fn test_start_failure_shows_error_and_repolls() {
    let mut state = test_state();
    let actions = run(
        &mut state,
        Message::ListenerStartFailed {
            error: "port_in_use".into(),
        },
    );
    assert_eq!(
        state.listener.last_error.as_deref(),
        Some("Error: port_in_use")
    );
    assert_eq!(
        actions,
        vec![
            UpdateAction::LoadLogs { limit: 200 },
            UpdateAction::FetchListenerStatus,
        ]
    );

    // Cleared by the next attempt
    run(&mut state, Message::StartListener);
    assert_eq!(state.listener.last_error, None);
}

#[test]
fn test_stop_repolls_status_on_either_outcome() {
    let mut state = test_state();
    assert_eq!(
        run(&mut state, Message::ListenerStopped),
        vec![UpdateAction::FetchListenerStatus]
    );
    assert_eq!(
        run(
            &mut state,
            Message::ListenerStopFailed {
                error: "boom".into()
            }
        ),
        vec![UpdateAction::FetchListenerStatus]
    );
}

#[test]
fn test_running_port_wins_over_fallback() {
    let mut state = test_state();
    state.ip.status = IpStatus::Found("10.0.0.5".into());
    state.filename.set("a.txt");
    run(&mut state, Message::SetFocus(Focus::FallbackPort));
    type_text(&mut state, "9999");
    assert_eq!(state.template_vars().port, "9999");

    run(
        &mut state,
        Message::ListenerStatusUpdated {
            status: FileServerStatus::running(8443),
        },
    );
    assert_eq!(state.template_vars().port, "8443");
    assert_eq!(state.template_vars().base, "/");
}

// ─────────────────────────────────────────────────────────────────────────────
// Access log
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_logs_replace_and_states() {
    let mut state = test_state();
    run(
        &mut state,
        Message::LogsLoaded {
            entries: vec![entry(200), entry(404)],
        },
    );
    assert_eq!(state.logs.entries().len(), 2);

    run(&mut state, Message::LogsLoaded { entries: vec![] });
    assert_eq!(state.logs.view, LogsView::NoData);

    run(
        &mut state,
        Message::LogsLoadFailed {
            error: "refused".into(),
        },
    );
    assert_eq!(state.logs.view, LogsView::Error);
}

#[test]
fn test_clear_logs_repolls_on_either_outcome() {
    let mut state = test_state();
    assert_eq!(
        key(&mut state, InputKey::Char('c')),
        vec![UpdateAction::ClearLogs]
    );
    assert_eq!(
        run(&mut state, Message::LogsCleared),
        vec![UpdateAction::LoadLogs { limit: 200 }]
    );
    assert_eq!(
        run(
            &mut state,
            Message::LogsClearFailed {
                error: "boom".into()
            }
        ),
        vec![UpdateAction::LoadLogs { limit: 200 }]
    );
}

#[test]
fn test_logs_toggle_off_then_on_restarts_single_poller() {
    let mut state = test_state();
    let off = key(&mut state, InputKey::Char('G'));
    let on = key(&mut state, InputKey::Char('G'));
    assert_eq!(
        off,
        vec![UpdateAction::StopPoller {
            kind: PollerKind::Logs
        }]
    );
    assert_eq!(
        on,
        vec![UpdateAction::StartPoller {
            kind: PollerKind::Logs,
            interval: Duration::from_secs(2),
        }]
    );
    assert_eq!(
        run(&mut state, Message::PollTick(PollerKind::Logs)),
        vec![UpdateAction::LoadLogs { limit: 200 }]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_switch_os_replaces_items_and_saves() {
    let mut state = test_state();
    state.commands.spec = Some(spec(&["a", "b", "c"]));
    state.commands.cursor = 2;

    let actions = key(&mut state, InputKey::Char('l'));

    assert_eq!(state.commands.os, OsTab::Linux);
    assert!(state.commands.spec.is_none());
    assert!(state.commands.loading);
    assert_eq!(state.commands.cursor, 0);
    assert_eq!(
        actions,
        vec![
            UpdateAction::SavePreferences(state.preferences()),
            UpdateAction::LoadCommands { os: OsTab::Linux },
        ]
    );

    run(
        &mut state,
        Message::CommandsLoaded {
            os: OsTab::Linux,
            spec: spec(&["wget {{url}}"]),
        },
    );
    assert_eq!(state.commands.item_count(), 1);
    assert!(!state.commands.loading);
}

#[test]
fn test_stale_commands_response_is_dropped() {
    let mut state = test_state();
    run(&mut state, Message::SwitchOs(OsTab::Linux));

    run(
        &mut state,
        Message::CommandsLoaded {
            os: OsTab::Windows,
            spec: spec(&["iwr {{url}}"]),
        },
    );
    assert!(state.commands.spec.is_none());

    run(
        &mut state,
        Message::CommandsLoadFailed {
            os: OsTab::Windows,
            error: "late".into(),
        },
    );
    assert!(state.commands.error.is_none());
}

#[test]
fn test_reload_keeps_items_until_response() {
    let mut state = test_state();
    state.commands.spec = Some(spec(&["a"]));

    let actions = key(&mut state, InputKey::Char('r'));
    assert_eq!(
        actions,
        vec![UpdateAction::LoadCommands {
            os: OsTab::Windows
        }]
    );
    assert!(state.commands.loading);
    assert_eq!(state.commands.item_count(), 1);
}

#[test]
fn test_copy_renders_selected_item() {
    let mut state = test_state();
    state.ip.manual_override = Some("10.0.0.5".into());
    state.filename.set("a.txt");
    state.commands.spec = Some(spec(&["echo {{ip}}", "curl -O {{url}}"]));
    state.focus = Focus::Commands;

    key(&mut state, InputKey::Down);
    let actions = key(&mut state, InputKey::Enter);

    assert_eq!(
        actions,
        vec![UpdateAction::CopyToClipboard {
            id: "cmd_0_1".into(),
            text: "curl -O http://10.0.0.5:3000/files/a.txt".into(),
        }]
    );
}

#[test]
fn test_copy_flash_expires_only_for_its_generation() {
    let mut state = test_state();

    let first = run(
        &mut state,
        Message::CommandCopied {
            id: "cmd_0_0".into(),
        },
    );
    assert_eq!(
        first,
        vec![UpdateAction::ExpireCopyFlash {
            generation: 1,
            after: COPY_FLASH_DURATION,
        }]
    );
    run(
        &mut state,
        Message::CommandCopied {
            id: "cmd_0_1".into(),
        },
    );

    // Expiry of the first copy leaves the second flash in place
    run(&mut state, Message::CopyFlashExpired { generation: 1 });
    assert!(state.commands.is_flashing("cmd_0_1"));

    run(&mut state, Message::CopyFlashExpired { generation: 2 });
    assert!(state.commands.flash.is_none());
}

#[test]
fn test_reloaded_commands_clear_copy_flash() {
    let mut state = test_state();
    state.commands.spec = Some(spec(&["a", "b"]));
    run(
        &mut state,
        Message::CommandCopied {
            id: "cmd_0_1".into(),
        },
    );
    assert!(state.commands.is_flashing("cmd_0_1"));

    run(
        &mut state,
        Message::CommandsLoaded {
            os: OsTab::Windows,
            spec: spec(&["c", "d"]),
        },
    );
    assert!(state.commands.flash.is_none());
    assert!(!state.commands.is_flashing("cmd_0_1"));
}

#[test]
fn test_copy_without_spec_does_nothing() {
    let mut state = test_state();
    assert!(run(&mut state, Message::CopySelectedCommand).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys & focus
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_quit_keys() {
    let mut state = test_state();
    key(&mut state, InputKey::Char('q'));
    assert!(state.should_quit());

    let mut state = test_state();
    state.focus = Focus::Filename;
    key(&mut state, InputKey::Char('q'));
    assert!(!state.should_quit());
    assert_eq!(state.filename.value(), "q");
    key(&mut state, InputKey::CharCtrl('c'));
    assert!(state.should_quit());
}

#[test]
fn test_text_field_editing() {
    let mut state = test_state();
    key(&mut state, InputKey::Tab);
    assert_eq!(state.focus, Focus::Filename);

    type_text(&mut state, "report.pdf");
    key(&mut state, InputKey::Backspace);
    assert_eq!(state.filename.value(), "report.pd");

    key(&mut state, InputKey::CharCtrl('u'));
    assert_eq!(state.filename.value(), "");

    key(&mut state, InputKey::Enter);
    assert_eq!(state.focus, Focus::FallbackPort);

    type_text(&mut state, "80a");
    assert_eq!(state.fallback_port.value(), "80");

    key(&mut state, InputKey::Esc);
    assert_eq!(state.focus, Focus::Files);
}

#[test]
fn test_toggle_os_key() {
    let mut state = test_state();
    key(&mut state, InputKey::Char('o'));
    assert_eq!(state.commands.os, OsTab::Linux);
    key(&mut state, InputKey::Char('o'));
    assert_eq!(state.commands.os, OsTab::Windows);
}

#[test]
fn test_logs_scroll_keys() {
    let mut state = test_state();
    run(
        &mut state,
        Message::LogsLoaded {
            entries: vec![entry(200), entry(301), entry(500)],
        },
    );
    state.focus = Focus::Logs;
    key(&mut state, InputKey::Char('j'));
    key(&mut state, InputKey::Down);
    key(&mut state, InputKey::Down);
    assert_eq!(state.logs.scroll, 2);
    key(&mut state, InputKey::Char('k'));
    assert_eq!(state.logs.scroll, 1);
}
