//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

// Re-export test utilities from grafana-client
#[allow(unused_imports)]
pub use grafana_client::testing::load_fixture;

#[allow(unused_imports)]
pub use grafana_client::{AuthStrategy, GrafanaClient, endpoints};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;

/// Bearer token credentials used by every mocked request.
#[allow(dead_code)]
pub fn token_auth() -> AuthStrategy {
    AuthStrategy::Token {
        token: SecretString::new("test-token".to_string().into()),
    }
}

/// Basic auth credentials (`admin:admin`).
#[allow(dead_code)]
pub fn basic_auth() -> AuthStrategy {
    AuthStrategy::Basic {
        username: "admin".to_string(),
        password: SecretString::new("admin".to_string().into()),
    }
}

/// A client pointed at the mock server, without retries.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> GrafanaClient {
    GrafanaClient::builder()
        .base_url(server.uri())
        .auth_strategy(token_auth())
        .max_retries(0)
        .build()
        .expect("client builds")
}
