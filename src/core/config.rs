//! Configuration file management.
//!
//! Settings are read from an optional TOML file and then overridden by
//! command-line flags. With no file and no flags the AWS provider chain
//! decides everything.
//!
//! ```toml
//! [store]
//! region = "eu-west-1"
//! profile = "deploy"
//! endpoint_url = "http://localhost:4566"
//!
//! [log]
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Launcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Secret store connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// AWS region, e.g. `us-east-1`.
    #[serde(default)]
    pub region: Option<String>,
    /// Named profile from the shared AWS config files.
    #[serde(default)]
    pub profile: Option<String>,
    /// Custom endpoint, e.g. a local emulator.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl StoreConfig {
    /// Replace fields with those set in `other`.
    pub fn merge(&mut self, other: StoreConfig) {
        if other.region.is_some() {
            self.region = other.region;
        }
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        if other.endpoint_url.is_some() {
            self.endpoint_url = other.endpoint_url;
        }
    }
}

/// Event output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// How run events are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line on stderr
    #[default]
    Json,
    /// Human-readable lines through the tracing subscriber
    Text,
}

impl Config {
    /// Default config file location, e.g. `~/.config/secretrun/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present, otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path().filter(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&contents)
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every set value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first empty setting.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("store.region", &self.store.region),
            ("store.profile", &self.store.profile),
            ("store.endpoint_url", &self.store.endpoint_url),
        ];
        for (name, value) in fields {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)).into());
            }
        }
        Ok(())
    }
}
