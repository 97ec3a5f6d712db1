//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes

pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::time::Duration;

use dwnldr_core::OsTab;

use crate::config::Preferences;
use crate::message::Message;
use crate::poller::PollerKind;

// Re-export main entry point
pub use update::update;

/// How long "Copied!" stays on a command item
pub const COPY_FLASH_DURATION: Duration = Duration::from_millis(900);

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// `GET /api/ip`
    DetectIp,

    /// Re-read the persisted manual override
    ReloadOverride,

    /// Write preferences to disk
    SavePreferences(Preferences),

    /// `GET /api/files`
    LoadFiles,

    /// `GET /api/file-listener`
    FetchListenerStatus,

    StartListener { port: u16 },

    StopListener,

    LoadLogs { limit: usize },

    ClearLogs,

    /// `GET /api/commands?os=`
    LoadCommands { os: OsTab },

    /// Write rendered command text to the system clipboard
    CopyToClipboard { id: String, text: String },

    /// Send `CopyFlashExpired` after a delay
    ExpireCopyFlash { generation: u64, after: Duration },

    /// Start (or restart) a periodic poller
    StartPoller { kind: PollerKind, interval: Duration },

    StopPoller { kind: PollerKind },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// Perform `action`, then process `msg`
    pub fn action_then(action: UpdateAction, msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}
