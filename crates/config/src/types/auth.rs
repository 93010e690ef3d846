//! Authentication types for Grafana configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (basic auth, bearer token).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Building request headers (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Strategy for authenticating with Grafana.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// Username and password sent as an HTTP Basic header.
    #[serde(rename = "basic")]
    Basic {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// Service account or API token sent as a Bearer header.
    #[serde(rename = "token")]
    Token {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

impl AuthStrategy {
    /// Short label for logging; never includes secret material.
    pub fn describe(&self) -> String {
        match self {
            Self::Basic { username, .. } => format!("basic auth as '{}'", username),
            Self::Token { .. } => "bearer token".to_string(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    #[serde(flatten)]
    pub strategy: AuthStrategy,
}
