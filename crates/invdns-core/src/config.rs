//! Configuration types for the invdns client
//!
//! Configuration is layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A JSON file named by `INVDNS_CONFIG`
//! 3. Environment variables (`INVDNS_REMOTE`, `INVDNS_API_VERSION`,
//!    `INVDNS_USERNAME`, `INVDNS_PASSWORD`, `INVDNS_MODE`)
//! 4. Global command-line flags, applied by the binary
//!
//! ## Security
//!
//! The password NEVER appears in `Debug` output or logs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Environment variable naming the optional JSON config file
pub const CONFIG_PATH_ENV: &str = "INVDNS_CONFIG";

/// Default API major version used in resource paths
pub const DEFAULT_API_VERSION: &str = "1";

/// Default inventory server
pub const DEFAULT_REMOTE: &str = "http://127.0.0.1:8000";

/// How API responses are rendered on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Response body exactly as received
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::config(format!(
                "Unknown output format '{}'. Valid formats: text, json",
                other
            ))),
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the inventory server (scheme, host, optional port)
    pub remote: String,

    /// API major version, rendered as `v{api_version}_dns` in paths
    pub api_version: String,

    /// HTTP basic auth username
    pub username: Option<String>,

    /// HTTP basic auth password
    /// ⚠️ NEVER log this value
    pub password: Option<String>,

    /// Response rendering
    pub output: OutputFormat,

    /// Build and log requests without sending them
    pub dry_run: bool,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("remote", &self.remote)
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<REDACTED>"))
            .field("output", &self.output)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            username: None,
            password: None,
            output: OutputFormat::default(),
            dry_run: false,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at `remote`, defaults elsewhere
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            ..Self::default()
        }
    }

    /// Set basic auth credentials
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// Reads the file named by `INVDNS_CONFIG` first (if set), then
    /// applies the individual `INVDNS_*` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Apply `INVDNS_*` overrides on top of the current values
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(remote) = lookup("INVDNS_REMOTE") {
            self.remote = remote;
        }
        if let Some(version) = lookup("INVDNS_API_VERSION") {
            self.api_version = version;
        }
        if let Some(username) = lookup("INVDNS_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = lookup("INVDNS_PASSWORD") {
            self.password = Some(password);
        }
        if lookup("INVDNS_MODE").is_some_and(|mode| mode.eq_ignore_ascii_case("dry-run")) {
            self.dry_run = true;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.remote.is_empty() {
            return Err(Error::config(
                "Remote URL is required. Set it via: export INVDNS_REMOTE=https://inventory.example.com",
            ));
        }

        if !self.remote.starts_with("https://") && !self.remote.starts_with("http://") {
            return Err(Error::config(format!(
                "Remote URL must use HTTP or HTTPS scheme. Got: {}",
                self.remote
            )));
        }

        if self.api_version.is_empty() || !self.api_version.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::config(format!(
                "API version must be a positive integer. Got: '{}'",
                self.api_version
            )));
        }

        if self.password.is_some() && self.username.as_deref().is_none_or(str::is_empty) {
            return Err(Error::config("A password was configured without a username"));
        }

        Ok(())
    }

    /// Basic auth credentials, if a username is configured
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| (u, self.password.as_deref()))
    }
}
