//! Main Grafana HTTP API client and API methods.
//!
//! This module provides the primary [`GrafanaClient`] used by every command.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `folders`: Folder listing and the create-or-update state machine
//! - `dashboards`: Dashboard search, fetch, home lookup and save
//! - `preferences`: Home dashboard preference and user stars
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Folder/dashboard reconciliation (handled by the sync crate)
//!
//! # Invariants
//! - Every request carries the configured credentials and org header
//! - Requests are issued one at a time; the client holds no mutable state

pub mod builder;

mod dashboards;
mod folders;
mod preferences;

use crate::auth::AuthStrategy;

/// Grafana HTTP API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use grafana_client::{AuthStrategy, GrafanaClient};
/// use secrecy::SecretString;
///
/// let client = GrafanaClient::builder()
///     .base_url("http://localhost:3000".to_string())
///     .auth_strategy(AuthStrategy::Token {
///         token: SecretString::new("glsa_...".to_string().into()),
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct GrafanaClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: AuthStrategy,
    pub(crate) max_retries: usize,
}

impl GrafanaClient {
    /// Create a new client builder.
    pub fn builder() -> builder::GrafanaClientBuilder {
        builder::GrafanaClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_strategy(&self) -> &AuthStrategy {
        &self.auth
    }

    /// Whether requests authenticate with a bearer token rather than basic auth.
    pub fn is_token_auth(&self) -> bool {
        self.auth.is_token()
    }
}
