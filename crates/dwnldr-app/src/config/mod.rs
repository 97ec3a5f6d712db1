//! Configuration file handling for dwnldr
//!
//! Supports:
//! - `~/.config/dwnldr/config.toml` - Global settings
//! - `~/.local/share/dwnldr/preferences.toml` - Persisted UI preferences

pub mod preferences;
pub mod settings;
pub mod types;

pub use preferences::PreferencesStore;
pub use settings::{default_config_path, ensure_config_exists, load_settings};
pub use types::*;
