//! # Configuration
//!
//! Main application configuration structure.
//! Matches the layout of `config.yaml`; missing credentials are a fatal
//! startup error surfaced through the `load` context.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub channel: ChannelConfig,
    #[serde(default)]
    pub process: ProcessConfig,
}

/// Credentials and identities for the message channel.
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelConfig {
    pub homeserver: String,
    pub username: String,
    pub password: String,
    /// The single authorized correspondent. Default recipient for
    /// announcements and diagnostics; state-changing commands are honored
    /// only from this identity.
    pub operator: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProcessConfig {
    /// Bounded wait for captured-output utility runs, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// `$XDG_CONFIG_HOME/heimdall/config.yaml`, falling back to the working
    /// directory when no config dir is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("heimdall").join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml"))
    }
}
