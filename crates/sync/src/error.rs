//! Error types for synchronization runs.

use std::path::PathBuf;

use grafana_client::ClientError;
use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that stop a download or upload.
///
/// Per-dashboard failures are not errors at this level; they are collected
/// in the run reports.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Source path '{}' does not exist or is not a directory", .0.display())]
    SourceNotFound(PathBuf),

    /// A folder directory contains a subdirectory.
    #[error(
        "Nested folders are not supported: '{}' is more than one level deep",
        path.display()
    )]
    NestingTooDeep { path: PathBuf },

    #[error("Destination path '{}' does not exist or is not a directory", .0.display())]
    DestinationNotFound(PathBuf),

    /// The operator declined a confirmation prompt.
    #[error("Aborted: confirmation declined")]
    Aborted,

    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
