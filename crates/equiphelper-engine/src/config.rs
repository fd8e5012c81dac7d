//! Configuration for the equipHelper client.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory name used under the platform data directory, and as the
/// working-directory fallback when no platform directory exists.
const APP_DIR: &str = "equiphelper";

/// File name of the config inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the Q&A endpoint.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Request timeout for a single dispatch, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Override for the data directory holding the persisted
    /// transcript; `None` uses the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_endpoint_url() -> String {
    "http://localhost:3000/api/ask".into()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            request_timeout_seconds: default_request_timeout(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load from the default location, falling back to defaults when no
    /// config file exists yet.
    pub fn load_or_default() -> Self {
        let path = default_data_dir().join(CONFIG_FILE);
        match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// The directory holding the persisted transcript and config.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Platform data directory for equipHelper, with a working-directory
/// fallback for environments without one.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map_or_else(|| PathBuf::from(format!(".{APP_DIR}")), |d| d.join(APP_DIR))
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
