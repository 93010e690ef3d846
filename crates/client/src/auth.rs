//! Authentication strategies for Grafana requests.
//!
//! Grafana accepts either HTTP basic auth or a bearer token (service account
//! or API key). Neither needs session management, so the strategy is applied
//! directly to every outgoing request.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Strategy for authenticating with Grafana.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password sent as an HTTP basic auth header.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Service account token or API key sent as a bearer token.
    Token { token: SecretString },
}

impl AuthStrategy {
    /// Attach credentials to a request.
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
            Self::Token { token } => builder.bearer_auth(token.expose_secret()),
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token { .. })
    }
}

impl From<&grafana_config::AuthStrategy> for AuthStrategy {
    fn from(strategy: &grafana_config::AuthStrategy) -> Self {
        match strategy {
            grafana_config::AuthStrategy::Basic { username, password } => Self::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            grafana_config::AuthStrategy::Token { token } => Self::Token {
                token: token.clone(),
            },
        }
    }
}
