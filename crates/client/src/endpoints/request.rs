//! Retry helper for HTTP requests with exponential backoff.
//!
//! This module provides functionality to automatically retry HTTP requests
//! that fail with HTTP 429 (Too Many Requests) status codes, using
//! exponential backoff between retry attempts, and to turn every other
//! non-2xx response into a [`ClientError::ApiError`].

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Sends an HTTP request with automatic retry logic for HTTP 429 responses.
///
/// - Implements exponential backoff (1s, 2s, 4s = 2^attempt)
/// - `max_retries == 0` sends the request exactly once
/// - Returns `MaxRetriesExceeded` when retries are exhausted
///
/// # Errors
///
/// Non-2xx responses become `ClientError::ApiError` carrying the server body
/// verbatim. Transport failures propagate as `ClientError::HttpError`.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return check_status(builder.send().await?).await;
            }
        };

        let response = attempt_builder.send().await?;
        if !ClientError::is_retryable_status(response.status().as_u16()) {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request completed after retry");
            }
            return check_status(response).await;
        }

        if attempt < max_retries {
            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                backoff_secs = backoff_secs,
                "Rate limited (HTTP 429), retrying with exponential backoff"
            );
            tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
        }
    }

    debug!(
        attempts = max_retries + 1,
        "Max retries exhausted for rate-limited request"
    );
    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Passes 2xx responses through and converts everything else to `ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    let message = text.trim().to_string();
    let body = serde_json::from_str(&message).ok();

    debug!(status, %url, "Grafana returned an error response");

    Err(ClientError::ApiError {
        status,
        url,
        message,
        body,
    })
}

/// Decodes a successful response body, naming the endpoint on failure.
pub async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse {what}: {e}")))
}
