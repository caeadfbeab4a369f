//! Agent configuration.
//!
//! Settings come from an optional JSON file, with environment variables
//! taking precedence over the file. Everything except the remote store
//! base URL has a sensible default.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::sampler::DEFAULT_WINDOW;

/// Remote store base URL, e.g. `https://myapp.firebaseio.com`.
pub const ENV_BASE_URL: &str = "FIELDPULSE_BASE_URL";
/// Optional database auth token.
pub const ENV_AUTH_TOKEN: &str = "FIELDPULSE_AUTH_TOKEN";
/// Externally supplied identity that overrides the generated one.
pub const ENV_SESSION_UID: &str = "FIELDPULSE_SESSION_UID";
/// Path of the local state file.
pub const ENV_STATE_PATH: &str = "FIELDPULSE_STATE_PATH";

/// Default period between scheduled cycles.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error(
        "remote store base URL is not configured (set FIELDPULSE_BASE_URL or base_url in the config file)"
    )]
    MissingBaseUrl,
}

/// Agent configuration after file and environment merging.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub session_uid: Option<String>,
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    #[serde(default)]
    pub window_ms: Option<u64>,
    #[serde(default)]
    pub interval_minutes: Option<u64>,
}

impl Config {
    /// Load configuration. A named file must exist; without one the
    /// defaults are used. Environment variables override either way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_var(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
        if let Some(v) = env_var(ENV_AUTH_TOKEN) {
            self.auth_token = Some(v);
        }
        if let Some(v) = env_var(ENV_SESSION_UID) {
            self.session_uid = Some(v);
        }
        if let Some(v) = env_var(ENV_STATE_PATH) {
            self.state_path = Some(PathBuf::from(v));
        }
    }

    /// The remote store base URL, or an error naming how to set it.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)
    }

    /// Where local state lives. Defaults to `~/.fieldpulse/state.json`,
    /// falling back to the working directory when HOME is unset.
    pub fn state_path(&self) -> PathBuf {
        if let Some(path) = &self.state_path {
            return path.clone();
        }
        match env_var("HOME") {
            Some(home) => Path::new(&home).join(".fieldpulse").join("state.json"),
            None => PathBuf::from("fieldpulse-state.json"),
        }
    }

    /// Observation window for one cycle.
    pub fn window(&self) -> Duration {
        self.window_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WINDOW)
    }

    /// Period between scheduled cycles.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.unwrap_or(DEFAULT_INTERVAL_MINUTES) * 60)
    }
}

/// Read an environment variable, treating empty or whitespace-only
/// values as unset.
fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
