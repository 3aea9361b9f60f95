// sbm configuration
// Resolves where the bookmark store lives and loads optional user settings.
// Settings are stored as a JSON file next to the store; a missing file means defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::types::errors::SettingsError;

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SBM_CONFIG_DIR";
/// Name of the optional settings file inside the configuration directory.
pub const SETTINGS_FILE: &str = "settings.json";
/// Default name of the store file.
pub const STORE_FILE: &str = "data.json";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File name of the store inside the configuration directory.
    pub store_file: String,
    /// Request timeout for title lookups, in seconds.
    pub fetch_timeout_secs: u64,
    /// User agent sent when fetching page titles.
    pub user_agent: String,
    /// Program used instead of the platform default to open URLs.
    pub viewer_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_file: STORE_FILE.to_string(),
            fetch_timeout_secs: 15,
            user_agent: format!("sbm/{}", env!("CARGO_PKG_VERSION")),
            viewer_command: None,
        }
    }
}

/// Resolved configuration handed to the repository and collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    config_dir: PathBuf,
    settings: Settings,
}

impl Config {
    /// Resolves the configuration directory (`SBM_CONFIG_DIR`, then the
    /// platform default) and loads settings from it.
    pub fn load() -> Result<Self, SettingsError> {
        let dir = match env::var(CONFIG_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => platform::get_config_dir(),
        };
        Self::load_from(dir)
    }

    /// Loads settings from `dir/settings.json`, falling back to defaults when
    /// the file does not exist.
    pub fn load_from<P: Into<PathBuf>>(dir: P) -> Result<Self, SettingsError> {
        let config_dir = dir.into();
        let settings = read_settings(&config_dir.join(SETTINGS_FILE))?;
        Ok(Self {
            config_dir,
            settings,
        })
    }

    /// Default settings rooted at `dir`, without touching the filesystem.
    pub fn with_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            config_dir: dir.into(),
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Full path of the store file.
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(&self.settings.store_file)
    }
}

fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| SettingsError::IoError(format!("Failed to read settings file: {}", e)))?;

    serde_json::from_str(&content).map_err(|e| {
        SettingsError::SerializationError(format!("Failed to parse settings file: {}", e))
    })
}
