//! Data models for Grafana API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod dashboards;
pub mod folders;
pub mod ids;
pub mod preferences;

pub use dashboards::{
    DashboardDocument, DashboardMeta, DashboardResponse, DashboardSearchResult, HomeDashboard,
    SaveDashboardRequest, SavedDashboard, uid_from_redirect,
};
pub use folders::{ApiMessage, CreateFolderRequest, Folder, UpdateFolderRequest};
pub use ids::{
    DashboardId, DashboardUid, FolderId, FolderUid, GENERAL_FOLDER_TITLE, GENERAL_FOLDER_UID,
};
pub use preferences::SetHomeDashboardRequest;
