use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panel_bridge::TransportSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub host_base_url: String,
    pub resource_name: String,
    pub request_timeout_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            host_base_url: transport.base_url,
            resource_name: transport.resource_name,
            request_timeout_ms: transport.request_timeout.as_millis() as u64,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            base_url: self.host_base_url.clone(),
            resource_name: self.resource_name.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Loads the RON config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<PanelConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PanelConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
