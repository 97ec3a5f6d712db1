//! Effective serving parameters
//!
//! Two serving modes share one panel: while the file listener runs, downloads
//! come from its root on its own port; otherwise they come from the main
//! application under its download prefix. The functions here pick the port
//! and base path that generated URLs and commands use.

use crate::template::TemplateVars;
use crate::types::FileServerStatus;
use crate::url::{build_url, normalize_base};

pub const DEFAULT_APP_PORT: u16 = 3000;
pub const DEFAULT_BASE_PATH: &str = "/files/";
pub const DEFAULT_LISTENER_PORT: u16 = 8443;

/// Clamp a user-entered fallback port.
///
/// Empty input means "no fallback". Anything else is read as a number and
/// clamped to 1–65535; unparsable text becomes 0 and therefore clamps to 1.
/// Fractions are truncated.
pub fn clamp_fallback_port(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let value = raw.parse::<f64>().ok().filter(|v| !v.is_nan()).unwrap_or(0.0);
    Some(value.clamp(1.0, 65535.0) as u16)
}

/// Per-render inputs: what the user typed or picked, resolved to plain values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedInputs {
    pub ip: String,
    pub filename: String,
    pub fallback_port: Option<u16>,
}

/// Static serving configuration of the main application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingPolicy {
    pub app_port: u16,
    base_path: String,
}

impl Default for ServingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_APP_PORT, DEFAULT_BASE_PATH)
    }
}

impl ServingPolicy {
    pub fn new(app_port: u16, base_path: &str) -> Self {
        Self {
            app_port,
            base_path: normalize_base(base_path),
        }
    }

    /// Download base used while the listener is stopped
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn set_base_path(&mut self, base_path: &str) {
        self.base_path = normalize_base(base_path);
    }

    /// Listener port if running, else the fallback port, else the app port
    pub fn effective_port(&self, status: &FileServerStatus, fallback_port: Option<u16>) -> u16 {
        status
            .active_port()
            .or(fallback_port)
            .unwrap_or(self.app_port)
    }

    /// `/` (the listener root) while running, else the configured base path
    pub fn effective_base(&self, status: &FileServerStatus) -> String {
        if status.running {
            "/".to_string()
        } else {
            self.base_path.clone()
        }
    }

    /// Resolve the template variables for one render pass
    pub fn template_vars(&self, inputs: &DerivedInputs, status: &FileServerStatus) -> TemplateVars {
        let port = self.effective_port(status, inputs.fallback_port).to_string();
        let base = self.effective_base(status);
        let url = build_url(&inputs.ip, &port, &base, &inputs.filename);

        TemplateVars {
            url,
            filename: inputs.filename.clone(),
            ip: inputs.ip.clone(),
            port,
            base,
        }
    }
}
