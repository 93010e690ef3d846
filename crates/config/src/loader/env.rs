//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `GRAFANA_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_HOST, ENV_MAX_RETRIES, ENV_ORG_ID, ENV_PASSWORD, ENV_PORT, ENV_SCHEME, ENV_SKIP_VERIFY,
    ENV_TIMEOUT, ENV_TOKEN, ENV_USERNAME,
};
use crate::types::Scheme;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Only values not already set on the loader are filled in, so builder
/// calls made from CLI flags keep precedence.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.host().is_none() {
        loader.set_host(env_var_or_none(ENV_HOST));
    }
    if loader.scheme().is_none()
        && let Some(raw) = env_var_or_none(ENV_SCHEME)
    {
        let scheme = raw
            .parse::<Scheme>()
            .map_err(|message| ConfigError::InvalidValue {
                var: ENV_SCHEME.to_string(),
                message,
            })?;
        loader.set_scheme(Some(scheme));
    }
    if loader.port().is_none() {
        loader.set_port(parse_env(ENV_PORT, "must be a port number (1-65535)")?);
    }
    if loader.username().is_none() {
        loader.set_username(env_var_or_none(ENV_USERNAME));
    }
    if !loader.has_password()
        && let Some(password) = env_var_or_none(ENV_PASSWORD)
    {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if !loader.has_token()
        && let Some(token) = env_var_or_none(ENV_TOKEN)
    {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if loader.org_id().is_none() {
        loader.set_org_id(parse_env(ENV_ORG_ID, "must be a numeric organization id")?);
    }
    if loader.skip_verify().is_none() {
        loader.set_skip_verify(parse_env(ENV_SKIP_VERIFY, "must be true or false")?);
    }
    if loader.timeout().is_none() {
        let secs: Option<u64> = parse_env(ENV_TIMEOUT, "must be a number of seconds")?;
        loader.set_timeout(secs.map(Duration::from_secs));
    }
    if loader.max_retries().is_none() {
        loader.set_max_retries(parse_env(
            ENV_MAX_RETRIES,
            "must be a non-negative integer",
        )?);
    }
    Ok(())
}
