//! Message types for the application (TEA pattern)

use dwnldr_api::FileList;
use dwnldr_core::{AccessLogEntry, CommandSpec, FileServerStatus, OsTab};

use crate::input_key::InputKey;
use crate::poller::PollerKind;
use crate::state::Focus;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (frontend idle timeout)
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    /// A periodic poller fired
    PollTick(PollerKind),

    // ─────────────────────────────────────────────────────────
    // Focus & Text Inputs
    // ─────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    SetFocus(Focus),
    /// Type a character into the focused text field
    InputChar(char),
    InputBackspace,
    /// Clear the focused text field
    InputClear,

    // ─────────────────────────────────────────────────────────
    // IP Resolver
    // ─────────────────────────────────────────────────────────
    /// Detect the LAN IP unless a manual override is set
    DetectIp,
    IpDetected { ip: Option<String> },
    IpDetectFailed { error: String },
    /// Re-read the persisted override, then detect
    RefreshIp,
    OverrideReloaded { manual_override: Option<String> },
    OpenIpEditor,
    CloseIpEditor,
    IpEditorInput(char),
    IpEditorBackspace,
    /// Persist the edited value as the manual override
    SaveIpOverride,
    ClearIpOverride,

    // ─────────────────────────────────────────────────────────
    // File Picker
    // ─────────────────────────────────────────────────────────
    RefreshFiles,
    FilesLoaded { list: FileList },
    FilesLoadFailed { error: String },
    FileCursorUp,
    FileCursorDown,
    /// Use the highlighted file as the download filename
    ConfirmFileSelection,
    ToggleFilesAutoRefresh,

    // ─────────────────────────────────────────────────────────
    // File Listener
    // ─────────────────────────────────────────────────────────
    RefreshListenerStatus,
    ListenerStatusUpdated { status: FileServerStatus },
    ListenerStatusFailed { error: String },
    StartListener,
    ListenerStarted,
    ListenerStartFailed { error: String },
    StopListener,
    ListenerStopped,
    ListenerStopFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Access Log
    // ─────────────────────────────────────────────────────────
    RefreshLogs,
    LogsLoaded { entries: Vec<AccessLogEntry> },
    LogsLoadFailed { error: String },
    ToggleLogsAutoRefresh,
    ClearLogs,
    LogsCleared,
    LogsClearFailed { error: String },
    LogsScrollUp,
    LogsScrollDown,

    // ─────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────
    SwitchOs(OsTab),
    ReloadCommands,
    CommandsLoaded { os: OsTab, spec: CommandSpec },
    CommandsLoadFailed { os: OsTab, error: String },
    CommandCursorUp,
    CommandCursorDown,
    CopySelectedCommand,
    /// Clipboard write succeeded for this item
    CommandCopied { id: String },
    CopyFlashExpired { generation: u64 },
}
