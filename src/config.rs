//! Configuration management for popstream
//!
//! Handles config file loading and TMDB credentials.
//! Config is stored at ~/.config/popstream/config.toml

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::api::Credential;
use crate::debounce::DEFAULT_DEBOUNCE;

/// Env var holding a TMDB v4 read access token
pub const ACCESS_TOKEN_ENV: &str = "TMDB_ACCESS_TOKEN";
/// Env var holding a TMDB v3 API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v4 read access token, sent as a bearer header
    pub tmdb_access_token: Option<String>,
    /// TMDB v3 API key, sent as `api_key`
    pub tmdb_api_key: Option<String>,
    /// TMDB `language` parameter
    pub language: String,
    pub include_adult: bool,
    /// Quiet period before a search query commits
    pub search_debounce_ms: u64,
    /// Extra rows kept clear below the bottom navigation bar
    pub safe_area_bottom: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_access_token: None,
            tmdb_api_key: None,
            language: "en-GB".to_string(),
            include_adult: false,
            search_debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            safe_area_bottom: 0,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/popstream/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("popstream").join("config.toml"))
    }

    /// Load config from the default path with env overrides applied
    pub fn load() -> Self {
        Self::load_from(None)
    }

    /// Load config from `path` (or the default path), falling back to defaults.
    ///
    /// A missing file is normal; an unreadable or malformed one is logged.
    pub fn load_from(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).or_else(Self::path);
        let mut config = path
            .as_deref()
            .and_then(|p| match std::fs::read_to_string(p) {
                Ok(s) => Some((p, s)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "could not read config");
                    None
                }
            })
            .and_then(|(p, s)| match Self::parse(&s) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "ignoring malformed config");
                    None
                }
            })
            .unwrap_or_default();

        config.apply_overrides(
            std::env::var(ACCESS_TOKEN_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );
        config
    }

    /// Parse TOML config text
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Non-empty override values replace the configured credentials
    pub fn apply_overrides(&mut self, access_token: Option<String>, api_key: Option<String>) {
        if let Some(token) = access_token.filter(|t| !t.trim().is_empty()) {
            self.tmdb_access_token = Some(token);
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.tmdb_api_key = Some(key);
        }
    }

    /// Access token wins over API key; neither means offline samples
    pub fn credential(&self) -> Credential {
        Credential::from_parts(
            self.tmdb_access_token.as_deref(),
            self.tmdb_api_key.as_deref(),
        )
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
