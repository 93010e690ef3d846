//! Grafana HTTP API client.
//!
//! This crate provides a typed client for the parts of the Grafana HTTP API
//! needed to move dashboards and folders between instances: folders,
//! dashboard search, dashboard get/save, the home dashboard, organization
//! preferences and user stars. It supports basic auth and bearer tokens.

mod auth;
pub mod client;
pub mod error;
pub mod models;

pub mod endpoints;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::AuthStrategy;
pub use client::GrafanaClient;
pub use client::builder::{GrafanaClientBuilder, ORG_ID_HEADER};
pub use error::{ClientError, Result};
pub use models::{
    ApiMessage, DashboardDocument, DashboardId, DashboardMeta, DashboardResponse,
    DashboardSearchResult, DashboardUid, Folder, FolderId, FolderUid, GENERAL_FOLDER_TITLE,
    GENERAL_FOLDER_UID, SavedDashboard,
};
