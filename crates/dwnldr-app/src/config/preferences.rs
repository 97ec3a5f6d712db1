//! Persisted UI preferences (manual IP override, OS tab)

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use dwnldr_core::prelude::*;

use super::types::Preferences;

const PREFERENCES_FILENAME: &str = "preferences.toml";

/// Upper bound on how long a reload waits for pending saves
const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Position of a save in dispatch order; later tickets supersede earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaveTicket(u64);

/// Dispatch counter and the last ticket settled, shared by all clones
#[derive(Debug, Default)]
struct WriteOrder {
    issued: AtomicU64,
    written: Mutex<u64>,
    settled: Condvar,
}

/// File-backed store for [`Preferences`]
///
/// Clones share one write order: saves may run on any thread, but a save
/// whose ticket is older than the one already on disk is skipped.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    order: Arc<WriteOrder>,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            order: Arc::new(WriteOrder::default()),
        }
    }

    /// `~/.local/share/dwnldr/preferences.toml`
    pub fn default_location() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("dwnldr").join(PREFERENCES_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reserve the next position in write order.
    ///
    /// Take the ticket where the save is requested, not where it runs.
    pub fn ticket(&self) -> SaveTicket {
        SaveTicket(self.order.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Load preferences; a missing or corrupt file yields the defaults
    pub fn load(&self) -> Preferences {
        let _written = self
            .order
            .written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.read_file()
    }

    /// Load after every save requested so far has settled (or a timeout)
    pub fn load_settled(&self) -> Preferences {
        let target = self.order.issued.load(Ordering::SeqCst);
        let written = self
            .order
            .written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (_written, wait) = self
            .order
            .settled
            .wait_timeout_while(written, SETTLE_TIMEOUT, |written| *written < target)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if wait.timed_out() {
            warn!("Pending preferences saves did not settle, reading current file");
        }
        self.read_file()
    }

    fn read_file(&self) -> Preferences {
        if !self.path.exists() {
            return Preferences::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str::<Preferences>(&content) {
                Ok(mut prefs) => {
                    // A blank override is the same as none
                    prefs.manual_ip_override = prefs
                        .manual_ip_override
                        .map(|ip| ip.trim().to_string())
                        .filter(|ip| !ip.is_empty());
                    prefs
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", self.path, e);
                    Preferences::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", self.path, e);
                Preferences::default()
            }
        }
    }

    /// Save preferences now, after any save already requested
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        self.save_ordered(self.ticket(), prefs).map(|_| ())
    }

    /// Save preferences unless a later ticket has already been written.
    ///
    /// Returns `false` when the save was superseded and skipped.
    pub fn save_ordered(&self, ticket: SaveTicket, prefs: &Preferences) -> Result<bool> {
        let mut written = self
            .order
            .written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if ticket.0 <= *written {
            debug!("Skipping superseded preferences save #{}", ticket.0);
            return Ok(false);
        }

        // A failed save still settles its ticket so reloads never wait on it
        let result = self.write_file(ticket, prefs);
        *written = ticket.0;
        self.order.settled.notify_all();
        result.map(|()| true)
    }

    /// Write atomically (per-save temp file + rename)
    fn write_file(&self, ticket: SaveTicket, prefs: &Preferences) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::config("Preferences path has no parent directory"))?;

        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
        }

        let header = "# dwnldr preferences (written by the app)\n\n";
        let content = toml::to_string_pretty(prefs)
            .map_err(|e| Error::config(format!("Failed to serialize preferences: {}", e)))?;

        let temp_path = self
            .path
            .with_extension(format!("toml.{}.{}.tmp", std::process::id(), ticket.0));
        std::fs::write(&temp_path, format!("{}{}", header, content))
            .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

        debug!("Saved preferences #{} to {:?}", ticket.0, self.path);
        Ok(())
    }
}
