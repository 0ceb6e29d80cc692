//! Optional user configuration at ~/.config/skyevents/config.toml

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::constants::{
    DEFAULT_MIN_ELEVATION_DEG, DEFAULT_NOTIFY_COUNT, DEFAULT_TIMEZONE, N2YO_API_KEY_ENV,
};
use crate::error::{SkyError, SkyResult};

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_min_elevation() -> u32 {
    DEFAULT_MIN_ELEVATION_DEG
}

fn default_notify_count() -> usize {
    DEFAULT_NOTIFY_COUNT
}

/// Every key is optional. Command-line flags and `N2YO_API_KEY` take
/// precedence over values here.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SkyConfig {
    /// IANA timezone name, or "local" for the system zone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_min_elevation")]
    pub min_elevation: u32,

    #[serde(default = "default_notify_count")]
    pub notify_count: usize,

    pub n2yo_api_key: Option<String>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        SkyConfig {
            timezone: default_timezone(),
            min_elevation: default_min_elevation(),
            notify_count: default_notify_count(),
            n2yo_api_key: None,
        }
    }
}

impl SkyConfig {
    /// `None` when the platform has no config directory (e.g. HOME unset).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skyevents").join("config.toml"))
    }

    /// Load the user config, falling back to defaults when there is none.
    pub fn load() -> SkyResult<Self> {
        Self::load_at(Self::config_path())
    }

    fn load_at(path: Option<PathBuf>) -> SkyResult<Self> {
        match path {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory, using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> SkyResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| SkyError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> SkyResult<Self> {
        toml::from_str(content).map_err(|e| SkyError::Config(e.message().to_string()))
    }

    /// The environment variable wins over the config file. Blank values are
    /// ignored.
    pub fn api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .or_else(|| self.n2yo_api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn api_key_from_env(&self) -> Option<String> {
        self.api_key(std::env::var(N2YO_API_KEY_ENV).ok())
    }
}
