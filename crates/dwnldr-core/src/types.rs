//! Domain types shared by the API client, the app state and the TUI

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// OS tab
// ─────────────────────────────────────────────────────────────────────────────

/// Operating system context for the command panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsTab {
    #[default]
    Windows,
    Linux,
}

impl OsTab {
    pub const ALL: [OsTab; 2] = [OsTab::Windows, OsTab::Linux];

    /// Wire value used by `/api/commands?os=`
    pub fn as_str(&self) -> &'static str {
        match self {
            OsTab::Windows => "windows",
            OsTab::Linux => "linux",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsTab::Windows => "Windows",
            OsTab::Linux => "Linux",
        }
    }

    pub fn other(&self) -> OsTab {
        match self {
            OsTab::Windows => OsTab::Linux,
            OsTab::Linux => OsTab::Windows,
        }
    }
}

impl fmt::Display for OsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(OsTab::Windows),
            "linux" => Ok(OsTab::Linux),
            other => Err(format!("unknown OS '{}', expected windows or linux", other)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File listener
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the backend's static file listener
///
/// Replaced wholesale on every status poll, never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct FileServerStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub port: Option<u16>,
}

impl FileServerStatus {
    pub fn stopped() -> Self {
        Self::default()
    }

    pub fn running(port: u16) -> Self {
        Self {
            running: true,
            port: Some(port),
        }
    }

    /// Port the listener is serving on, only while it is running
    pub fn active_port(&self) -> Option<u16> {
        if self.running {
            self.port
        } else {
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command specification
// ─────────────────────────────────────────────────────────────────────────────

/// One copyable shell command template
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CommandItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_default")]
    pub template: String,
}

/// Named set of command templates
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CommandGroup {
    #[serde(default, deserialize_with = "string_or_default")]
    pub title: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub items: Vec<CommandItem>,
}

impl CommandGroup {
    /// Title shown in the panel; untitled groups read "Commands"
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Commands"
        } else {
            &self.title
        }
    }
}

/// Command templates for one OS, as returned by `/api/commands`
///
/// `error` and `path` are only present when the backend could not read its
/// command file and served its built-in fallback set instead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CommandSpec {
    #[serde(default)]
    pub groups: Vec<CommandGroup>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl CommandSpec {
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access log
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP status column of an access log row
///
/// The listener writes a number, or `"-"` when no response was sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LogCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for LogCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogCode::Number(n) => write!(f, "{}", n),
            LogCode::Text(s) => f.write_str(s),
        }
    }
}

impl LogCode {
    pub fn class(&self) -> Option<CodeClass> {
        match self {
            LogCode::Number(n) => CodeClass::for_status(*n),
            LogCode::Text(s) => CodeClass::classify(s),
        }
    }
}

/// Severity bucket for a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl CodeClass {
    pub fn from_code(code: i64) -> Self {
        if code >= 500 {
            CodeClass::ServerError
        } else if code >= 400 {
            CodeClass::ClientError
        } else if code >= 300 {
            CodeClass::Redirect
        } else {
            CodeClass::Success
        }
    }

    /// Like [`CodeClass::from_code`], but `0` means no status was recorded
    pub fn for_status(code: i64) -> Option<Self> {
        (code != 0).then(|| Self::from_code(code))
    }

    /// Classify a textual code by its leading integer.
    ///
    /// `"404 Not Found"` is a client error; `"-"`, `""` and `"0"` have no class.
    pub fn classify(code: &str) -> Option<Self> {
        leading_integer(code).and_then(Self::for_status)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CodeClass::Success => "2xx",
            CodeClass::Redirect => "3xx",
            CodeClass::ClientError => "4xx",
            CodeClass::ServerError => "5xx",
        }
    }
}

/// Parse an optional sign and the digits that follow leading whitespace
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let value = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// One request served by the file listener
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AccessLogEntry {
    #[serde(default, deserialize_with = "string_or_default")]
    pub time: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub client: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub method: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub path: String,
    #[serde(default)]
    pub code: Option<LogCode>,
    #[serde(default)]
    pub ua: Option<String>,
}

impl AccessLogEntry {
    pub fn code_text(&self) -> String {
        self.code.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn code_class(&self) -> Option<CodeClass> {
        self.code.as_ref().and_then(LogCode::class)
    }
}

/// Treat JSON `null` like a missing string field
fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
