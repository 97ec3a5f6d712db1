//! Settings loader for config.toml

use std::path::{Path, PathBuf};

use dwnldr_core::prelude::*;

use super::types::Settings;

const APP_DIR: &str = "dwnldr";
const CONFIG_FILENAME: &str = "config.toml";

/// Default location of the settings file (`~/.config/dwnldr/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, falling back to defaults.
///
/// A missing file is normal; an unreadable or invalid one is logged and
/// ignored so the panel always starts.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(config_path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        debug!("No config directory available, using default settings");
        return Settings::default();
    };

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Require an explicitly given config file to exist
pub fn ensure_config_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        })
    }
}
