//! Host configuration loaded from TOML.
//!
//! The file lives at `~/.config/imgsearch/config.toml` by default. Every
//! field is optional; missing fields fall back to [`HostConfig::default`].
//! The provider key can also come from the `IMGSEARCH_SERPAPI_KEY`
//! environment variable, which wins over the file.

use image_search::SearchConfig;
use image_search::config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HostError, Result};

/// Environment variable that overrides [`HostConfig::serpapi_api_key`].
pub const API_KEY_ENV: &str = "IMGSEARCH_SERPAPI_KEY";

/// Settings for the host process.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// SerpApi credential.
    pub serpapi_api_key: String,
    /// Provider endpoint root.
    pub base_url: String,
    /// Images kept per query.
    pub images_per_query: usize,
    /// Candidates requested per kept image.
    pub overfetch_factor: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent presented to the provider and image hosts.
    pub user_agent: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            serpapi_api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            images_per_query: 1,
            overfetch_factor: 3,
            timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl std::fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostConfig")
            .field("serpapi_api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("images_per_query", &self.images_per_query)
            .field("overfetch_factor", &self.overfetch_factor)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HostConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HostError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| HostError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/imgsearch/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("imgsearch").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("imgsearch")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/imgsearch-config/config.toml")
        }
    }

    /// Load from `path` (or the default path when it exists), then apply
    /// the environment key override.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be loaded, or
    /// the default file exists but is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file; using defaults");
                    Self::default()
                }
            }
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Replace the API key when `key` is present and non-blank.
    #[must_use]
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.serpapi_api_key = key;
        }
        self
    }

    /// Retrieval settings for the pipeline.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            api_key: self.serpapi_api_key.clone(),
            base_url: self.base_url.clone(),
            images_per_query: self.images_per_query,
            overfetch_factor: self.overfetch_factor,
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
        }
    }
}
