//! Rate-limit retry tests.
//!
//! # Invariants
//! - HTTP 429 is retried with 2^attempt second backoff
//! - Exhausting retries yields `MaxRetriesExceeded`
//! - Other error statuses are never retried

mod common;

use common::*;
use grafana_client::ClientError;
use wiremock::matchers::{method, path};

#[tokio::test(start_paused = true)]
async fn test_retry_after_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("folders/list_folders.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let folders = endpoints::list_folders(&client, &mock_server.uri(), &token_auth(), 3)
        .await
        .unwrap();
    assert_eq!(folders.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_max_retries_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let err = endpoints::list_folders(&client, &mock_server.uri(), &token_auth(), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MaxRetriesExceeded(3)));
}

#[tokio::test]
async fn test_zero_retries_sends_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let err = endpoints::list_folders(&client, &mock_server.uri(), &token_auth(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MaxRetriesExceeded(1)));
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let err = endpoints::list_folders(&client, &mock_server.uri(), &token_auth(), 3)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = Client::new();
    let err = endpoints::list_folders(&client, &uri, &token_auth(), 0)
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let err = endpoints::list_folders(&client, &mock_server.uri(), &token_auth(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
