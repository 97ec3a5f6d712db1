//! Configuration types for dwnldr
//!
//! Defines:
//! - `Settings` - Global application settings (`config.toml`)
//! - `Preferences` - Client-persisted UI state (`preferences.toml`)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dwnldr_core::{
    OsTab, ServingPolicy, DEFAULT_APP_PORT, DEFAULT_BASE_PATH, DEFAULT_LISTENER_PORT,
};

/// Application settings (`~/.config/dwnldr/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub serving: ServingSettings,

    #[serde(default)]
    pub polling: PollingSettings,
}

impl Settings {
    pub fn serving_policy(&self) -> ServingPolicy {
        ServingPolicy::new(self.serving.app_port, &self.serving.base_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the backend API
    #[serde(default = "default_server_url")]
    pub url: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// How download URLs are formed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServingSettings {
    /// Port of the main application, used when nothing else applies
    #[serde(default = "default_app_port")]
    pub app_port: u16,

    /// Download prefix of the main application while the listener is stopped
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Pre-filled listener port when the backend reports none
    #[serde(default = "default_listener_port")]
    pub default_listener_port: u16,
}

impl Default for ServingSettings {
    fn default() -> Self {
        Self {
            app_port: default_app_port(),
            base_path: default_base_path(),
            default_listener_port: default_listener_port(),
        }
    }
}

fn default_app_port() -> u16 {
    DEFAULT_APP_PORT
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

fn default_listener_port() -> u16 {
    DEFAULT_LISTENER_PORT
}

/// Poller intervals and defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollingSettings {
    #[serde(default = "default_files_interval_ms")]
    pub files_interval_ms: u64,

    #[serde(default = "default_logs_interval_ms")]
    pub logs_interval_ms: u64,

    #[serde(default = "default_true")]
    pub files_auto_refresh: bool,

    #[serde(default = "default_true")]
    pub logs_auto_refresh: bool,

    /// Rows requested per access log poll
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            files_interval_ms: default_files_interval_ms(),
            logs_interval_ms: default_logs_interval_ms(),
            files_auto_refresh: true,
            logs_auto_refresh: true,
            log_limit: default_log_limit(),
        }
    }
}

impl PollingSettings {
    /// Intervals below 250ms are raised to 250ms
    pub fn files_interval(&self) -> Duration {
        Duration::from_millis(self.files_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn logs_interval(&self) -> Duration {
        Duration::from_millis(self.logs_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

const MIN_POLL_INTERVAL_MS: u64 = 250;

fn default_files_interval_ms() -> u64 {
    5000
}

fn default_logs_interval_ms() -> u64 {
    2000
}

fn default_log_limit() -> usize {
    200
}

fn default_true() -> bool {
    true
}

/// UI state that survives restarts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Preferences {
    /// User-supplied IP that takes precedence over detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_ip_override: Option<String>,

    /// Last selected command tab
    #[serde(default)]
    pub os_tab: OsTab,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.url, "http://127.0.0.1:3000");
        assert_eq!(settings.serving.app_port, 3000);
        assert_eq!(settings.serving.base_path, "/files/");
        assert_eq!(settings.serving.default_listener_port, 8443);
        assert_eq!(settings.polling.files_interval(), Duration::from_secs(5));
        assert_eq!(settings.polling.logs_interval(), Duration::from_secs(2));
        assert_eq!(settings.polling.log_limit, 200);
        assert!(settings.polling.files_auto_refresh);
        assert!(settings.polling.logs_auto_refresh);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [serving]
            app_port = 8080

            [polling]
            logs_interval_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.serving.app_port, 8080);
        assert_eq!(settings.serving.base_path, "/files/");
        assert_eq!(settings.polling.logs_interval(), Duration::from_millis(250));
        assert_eq!(settings.server, ServerSettings::default());
    }

    #[test]
    fn test_serving_policy_normalizes_base() {
        let mut settings = Settings::default();
        settings.serving.base_path = "/dl".into();
        assert_eq!(settings.serving_policy().base_path(), "/dl/");
    }

    #[test]
    fn test_preferences_omit_missing_override() {
        let prefs = Preferences {
            manual_ip_override: None,
            os_tab: OsTab::Linux,
        };
        let text = toml::to_string_pretty(&prefs).unwrap();
        assert!(!text.contains("manual_ip_override"));
        assert!(text.contains("os_tab = \"linux\""));
    }
}
