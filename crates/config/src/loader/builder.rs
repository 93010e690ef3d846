//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Normalize the `--host` value (scheme prefix, embedded port, trailing slash).
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Token auth takes precedence over basic auth when both are supplied.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, Scheme};

/// Configuration loader that builds config from environment variables and CLI flags.
#[derive(Default)]
pub struct ConfigLoader {
    host: Option<String>,
    scheme: Option<Scheme>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<SecretString>,
    token: Option<SecretString>,
    org_id: Option<u64>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
}

/// Host parts after normalization.
#[derive(Debug, PartialEq)]
struct HostParts {
    scheme: Scheme,
    host: String,
    port: Option<u16>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Fill in any values not already set from `GRAFANA_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the Grafana host. May include a scheme and port (`https://host:3000`).
    pub fn with_host(mut self, host: String) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the organization id sent with every request.
    pub fn with_org_id(mut self, org_id: u64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let raw_host = self.host.as_deref().ok_or(ConfigError::MissingHost)?;
        let parts = normalize_host(raw_host, self.scheme)?;

        let strategy = match (self.token, self.username, self.password) {
            (Some(token), _, _) => AuthStrategy::Token { token },
            (None, Some(username), Some(password)) => AuthStrategy::Basic { username, password },
            (None, None, None) => return Err(ConfigError::MissingAuth),
            (None, _, _) => return Err(ConfigError::IncompleteBasicAuth),
        };

        let connection = ConnectionConfig {
            scheme: parts.scheme,
            host: parts.host,
            port: self.port.or(parts.port),
            org_id: self.org_id,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        };

        Self::validate_connection(&connection)?;

        tracing::debug!(
            base_url = %connection.base_url(),
            auth = %strategy.describe(),
            org_id = ?connection.org_id,
            "Configuration built"
        );

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
        })
    }

    /// Validates timeout and retry bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }

    // Internal accessor methods for env.rs

    pub(crate) fn host(&self) -> Option<&String> {
        self.host.as_ref()
    }

    pub(crate) fn scheme(&self) -> Option<Scheme> {
        self.scheme
    }

    pub(crate) fn port(&self) -> Option<u16> {
        self.port
    }

    pub(crate) fn username(&self) -> Option<&String> {
        self.username.as_ref()
    }

    pub(crate) fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub(crate) fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn org_id(&self) -> Option<u64> {
        self.org_id
    }

    pub(crate) fn skip_verify(&self) -> Option<bool> {
        self.skip_verify
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn max_retries(&self) -> Option<usize> {
        self.max_retries
    }

    pub(crate) fn set_host(&mut self, host: Option<String>) {
        self.host = host;
    }

    pub(crate) fn set_scheme(&mut self, scheme: Option<Scheme>) {
        self.scheme = scheme;
    }

    pub(crate) fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_org_id(&mut self, org_id: Option<u64>) {
        self.org_id = org_id;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }
}

/// Validates and normalizes a host string.
///
/// Accepted forms: `grafana.example.com`, `grafana.example.com:3000`,
/// `https://grafana.example.com:3000/`. A scheme embedded in the host must
/// agree with an explicitly configured scheme. Paths are rejected.
fn normalize_host(raw: &str, explicit_scheme: Option<Scheme>) -> Result<HostParts, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::MissingHost);
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}://{}", explicit_scheme.unwrap_or_default(), trimmed)
    };

    let invalid = |message: String| ConfigError::InvalidValue {
        var: "host".to_string(),
        message,
    };

    let parsed = url::Url::parse(&candidate)
        .map_err(|e| invalid(format!("must be a hostname such as grafana.example.com: {e}")))?;

    let scheme: Scheme = parsed.scheme().parse().map_err(invalid)?;
    if let Some(explicit) = explicit_scheme
        && explicit != scheme
    {
        return Err(invalid(format!(
            "host uses {scheme}:// but --scheme is {explicit}"
        )));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| invalid("host is required".to_string()))?
        .to_string();

    if !parsed.path().trim_matches('/').is_empty() || parsed.query().is_some() {
        return Err(invalid(format!(
            "must not contain a path or query (got {trimmed})"
        )));
    }

    Ok(HostParts {
        scheme,
        host,
        port: parsed.port(),
    })
}
