// ABOUTME: Client configuration loading
// ABOUTME: Resolves the API base URL from a flag, the environment, or a TOML file

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BoardError, Result};

pub const BASE_URL_ENV: &str = "JOBBOARD_API_BASE_URL";
pub const DEFAULT_CONFIG_FILE: &str = "jobboard.toml";
pub const DEFAULT_NOTICE_SECS: u64 = 4;

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub api_base_url: String,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
    /// How long a success notice stays visible.
    pub notice_secs: u64,
}

impl BoardConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout_secs: None,
            notice_secs: DEFAULT_NOTICE_SECS,
        }
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }
}

/// On-disk form of the configuration; every key is optional.
///
/// ```toml
/// api_base_url = "http://localhost:5000/api"
/// timeout_secs = 30
/// notice_secs = 4
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub notice_secs: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BoardError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
            .map_err(|e| BoardError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Build the configuration with precedence flag > environment > file.
///
/// An explicitly given config path must exist; the default one is optional.
pub fn resolve(
    flag_url: Option<String>,
    env_url: Option<String>,
    config_path: Option<&Path>,
) -> Result<BoardConfig> {
    let file = match config_path {
        Some(path) => ConfigFile::load(path)?,
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.exists() {
                ConfigFile::load(&default)?
            } else {
                ConfigFile::default()
            }
        }
    };

    let api_base_url = flag_url
        .or(env_url)
        .or(file.api_base_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            BoardError::Config(format!(
                "No API base URL configured. Pass --api-url, set {}, or add api_base_url to {}",
                BASE_URL_ENV, DEFAULT_CONFIG_FILE
            ))
        })?;
    let api_base_url = validate_base_url(api_base_url.trim())?;

    Ok(BoardConfig {
        api_base_url,
        timeout_secs: file.timeout_secs,
        notice_secs: file.notice_secs.unwrap_or(DEFAULT_NOTICE_SECS),
    })
}

/// Resolve using the process environment for the env layer.
pub fn resolve_from_env(flag_url: Option<String>, config_path: Option<&Path>) -> Result<BoardConfig> {
    resolve(flag_url, std::env::var(BASE_URL_ENV).ok(), config_path)
}

fn validate_base_url(url: &str) -> Result<String> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(BoardError::Config(format!(
            "API base URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}
