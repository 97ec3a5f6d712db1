//! Response bodies of the backend endpoints that have no core counterpart

use serde::Deserialize;

use dwnldr_core::{normalize_base, AccessLogEntry};

/// `GET /api/ip`
#[derive(Debug, Deserialize)]
pub(crate) struct IpResponse {
    #[serde(default)]
    pub ip: Option<String>,
}

/// `GET /api/file-listener/logs`
#[derive(Debug, Deserialize)]
pub(crate) struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<AccessLogEntry>,
}

/// Body of `POST /api/file-listener/start` (and other mutating calls)
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/files`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<String>,
    /// Directory the backend lists and serves from
    #[serde(default)]
    pub root: Option<String>,
    /// Whether the main application serves files under `prefix`
    #[serde(default)]
    pub serving: Option<bool>,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl FileList {
    /// Download base of the main application, when the backend reports it
    ///
    /// `prefix` if the application serves files itself, `/` if it does not.
    pub fn download_base(&self) -> Option<String> {
        match self.serving {
            Some(true) => self.prefix.as_deref().map(normalize_base),
            Some(false) => Some("/".to_string()),
            None => None,
        }
    }
}
