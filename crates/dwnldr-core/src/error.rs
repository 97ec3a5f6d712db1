//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Backend API Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timed out: {endpoint}")]
    Timeout { endpoint: String },

    #[error("Backend returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Invalid server URL: {url}")]
    InvalidServerUrl { url: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────
    #[error("Clipboard unavailable: {message}")]
    Clipboard { message: String },

}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(endpoint: impl Into<String>) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    /// Server-provided message for an [`Error::Api`] failure, if any.
    ///
    /// The file listener surfaces this inline (`Error: port_in_use`).
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Every backend failure is recoverable: the next poll tick or a manual
    /// refresh retries it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. }
                | Error::Timeout { .. }
                | Error::Api { .. }
                | Error::Decode { .. }
                | Error::Clipboard { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::api(409, "port_in_use");
        assert_eq!(err.to_string(), "Backend returned HTTP 409: port_in_use");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_api_message_only_for_api_errors() {
        assert_eq!(
            Error::api(500, "bind_failed: in use").api_message(),
            Some("bind_failed: in use")
        );
        assert_eq!(Error::api(500, "").api_message(), None);
        assert_eq!(Error::network("down").api_message(), None);
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::network("test").is_recoverable());
        assert!(Error::timeout("/api/ip").is_recoverable());
        assert!(Error::decode("/api/files", "missing field").is_recoverable());
        assert!(Error::clipboard("no display").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
    }

    #[test]
    fn test_result_ext_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("writing preferences").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
