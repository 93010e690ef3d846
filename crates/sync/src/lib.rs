//! Folder and dashboard reconciliation between Grafana and a local tree.
//!
//! The local layout is exactly two levels deep:
//!
//! ```text
//! <root>/
//!   home.json
//!   folders.json
//!   <Folder title>/<Dashboard title>.json
//!   General/<Dashboard title>.json
//! ```
//!
//! [`download`] mirrors a Grafana instance into that layout and [`upload`]
//! pushes it back, creating folders before dashboards. Integer ids are
//! instance-local, so dashlist panels that point at folders by id are
//! rewritten against the target instance's folder list on the way out and
//! on the way in (see [`rewrite`]).

pub mod destination;
pub mod download;
pub mod error;
pub mod files;
pub mod identity;
pub mod manifest;
pub mod prompt;
pub mod rewrite;
pub mod source;
pub mod upload;

pub use download::{DownloadOptions, DownloadReport, FailedDashboard, download};
pub use error::{Result, SyncError};
pub use identity::FolderDestination;
pub use manifest::{FolderManifest, ManifestEntry};
pub use prompt::{AssumeYes, Confirm};
pub use rewrite::{PanelLayout, RewriteMode, RewriteReport};
pub use source::{SourceFolder, SourceTree};
pub use upload::{FailedUpload, HomeOutcome, HomePolicy, UploadOptions, UploadReport, upload};
