//! Connection configuration types for Grafana.
//!
//! Responsibilities:
//! - Define connection settings (scheme, host, port, organization, TLS, timeouts).
//! - Define the main `Config` structure combining connection and auth.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env/CLI (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `host` never carries a scheme prefix or trailing slash once built by the loader.
//! - All duration fields are serialized as seconds (integers).

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::{AuthConfig, AuthStrategy};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// URL scheme used to reach Grafana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(format!("scheme must be http or https, got: {other}")),
        }
    }
}

/// Connection configuration for a Grafana server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub scheme: Scheme,
    /// Hostname (no scheme, no trailing slash)
    pub host: String,
    /// Explicit port; `None` uses the scheme's default port
    pub port: Option<u16>,
    /// Organization id sent as `X-Grafana-Org-Id`
    pub org_id: Option<u64>,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
}

impl ConnectionConfig {
    /// Create connection settings with defaults for everything but the target.
    pub fn new(scheme: Scheme, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
            org_id: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// The server root, e.g. `https://grafana.example.com:3000`.
    ///
    /// API paths are appended under `/api` by the client.
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}

impl Config {
    /// Create a new config with a bearer token.
    ///
    /// No validation happens here; the CLI goes through `ConfigLoader`.
    pub fn with_token(connection: ConnectionConfig, token: SecretString) -> Self {
        Self {
            connection,
            auth: AuthConfig {
                strategy: AuthStrategy::Token { token },
            },
        }
    }

    /// Create a new config with username/password basic auth.
    pub fn with_basic_auth(
        connection: ConnectionConfig,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            connection,
            auth: AuthConfig {
                strategy: AuthStrategy::Basic { username, password },
            },
        }
    }

    /// Whether the configured credentials are a bearer token.
    pub fn is_token_auth(&self) -> bool {
        matches!(self.auth.strategy, AuthStrategy::Token { .. })
    }
}
