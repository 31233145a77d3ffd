//! Server configuration, loaded from a TOML file with defaults for every
//! field. The optional `tokens` and `matches` tables seed the in-memory
//! collaborators so a standalone server is immediately usable.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Configuration for the serving process.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Upper bound on a single outbound send, in milliseconds. A send
    /// that cannot complete within this window is dropped and logged.
    #[serde(default = "default_send_timeout_ms")]
    send_timeout_ms: u64,

    /// Capacity of each session's outbound message queue.
    #[serde(default = "default_channel_capacity")]
    channel_capacity: usize,

    /// Auth tokens to seed the in-memory token table.
    #[serde(default)]
    tokens: Vec<TokenSeed>,

    /// Matches to seed the in-memory directory.
    #[serde(default)]
    matches: Vec<MatchSeed>,
}

/// One seeded token → identity binding.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct TokenSeed {
    /// Opaque token value.
    token: String,
    /// Identity the token resolves to.
    identity: String,
}

/// One seeded match record.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct MatchSeed {
    /// Match id.
    id: i64,
    /// Display name.
    name: String,
    /// Identity recorded for the white seat, if taken.
    #[serde(default)]
    white: Option<String>,
    /// Identity recorded for the black seat, if taken.
    #[serde(default)]
    black: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_send_timeout_ms() -> u64 {
    2_000
}

fn default_channel_capacity() -> usize {
    32
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "config loaded");
        Ok(config)
    }

    /// Replaces host and port with CLI-provided values, when present.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// The outbound send bound as a [`Duration`].
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            send_timeout_ms: default_send_timeout_ms(),
            channel_capacity: default_channel_capacity(),
            tokens: Vec::new(),
            matches: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
