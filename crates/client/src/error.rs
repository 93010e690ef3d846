//! Error types for the Grafana client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Grafana client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Transport-level failure (connection refused, TLS, timeout, decode).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response from Grafana.
    ///
    /// `message` is the response body as sent by the server (trimmed);
    /// `body` holds it parsed when it was JSON.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Folder already exists and overwriting was not requested.
    #[error("Folder '{title}' already exists (uid {uid}); pass --overwrite to update it")]
    FolderExists { title: String, uid: String },
}

impl ClientError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether Grafana rejected a write because the object already exists.
    ///
    /// Folder creation answers 409 on a uid clash and 412 on a version or
    /// title clash; both are treated as "exists, update instead".
    pub fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409 | 412))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_))
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_)) || matches!(self.status(), Some(401 | 403))
    }

    /// Check if an HTTP status code is retried by the request layer.
    pub fn is_retryable_status(status: u16) -> bool {
        status == 429
    }
}
