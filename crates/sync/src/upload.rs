//! Upload: push a local tree into a Grafana instance.
//!
//! Responsibilities:
//! - Validate the source tree before any network call.
//! - Ensure every folder exists (reuse by title, else create or update).
//! - Upload each dashboard into its folder, then the home dashboard.
//!
//! Does NOT handle:
//! - Deleting dashboards or folders missing from the tree.
//!
//! Invariants:
//! - Folders are processed before dashboards; folder failures stop the run.
//! - A failing dashboard is logged with the server's message and skipped.
//! - `General` never goes through the folder API.
//! - A home dashboard already uploaded from a folder directory stays in that
//!   folder; it is only looked up and made home.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use grafana_client::{
    AuthStrategy, DashboardDocument, DashboardId, DashboardUid, Folder, FolderUid, GENERAL_FOLDER_TITLE,
    GrafanaClient, SavedDashboard,
};
use tracing::{debug, error, info, warn};

use crate::error::{Result, SyncError};
use crate::files::read_json;
use crate::identity::{FolderDestination, find_folder_by_title, resolve_folder_uid};
use crate::manifest::FolderManifest;
use crate::prompt::Confirm;
use crate::rewrite::{RewriteMode, rewrite_dashlist_folder_ids};
use crate::source::{HOME_DASHBOARD_UID, SourceFolder, SourceTree};

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub source: PathBuf,
    /// Update folders that already exist under the derived uid.
    pub overwrite: bool,
    pub non_interactive: bool,
    pub skip_home: bool,
}

/// A dashboard file that could not be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedUpload {
    pub path: PathBuf,
    pub error: String,
}

/// What happened to the home dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeOutcome {
    /// `--skip-home` or no `home.json`.
    Skipped,
    /// Uploaded, but the lookup by uid found nothing.
    NotFound,
    Starred,
    AlreadyStarred,
    SetAsHome,
    Failed(String),
}

/// How the uploaded home dashboard is made the home dashboard.
///
/// Setting the organization preference needs an API token with admin
/// rights. Basic-auth sessions in some deployments cannot do that, so they
/// star the dashboard for the current user instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomePolicy {
    StarOnly,
    SetOrgPreference,
}

impl HomePolicy {
    pub fn for_auth(auth: &AuthStrategy) -> Self {
        if auth.is_token() {
            Self::SetOrgPreference
        } else {
            Self::StarOnly
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadReport {
    /// Folders reused or created, in source order. General is not listed.
    pub folders: Vec<Folder>,
    /// Dashboard files uploaded.
    pub uploaded: Vec<PathBuf>,
    pub failed: Vec<FailedUpload>,
    pub home: HomeOutcome,
}

/// Upload the tree at `options.source`.
pub async fn upload(
    client: &GrafanaClient,
    options: &UploadOptions,
    confirm: &dyn Confirm,
) -> Result<UploadReport> {
    let tree = SourceTree::scan(&options.source)?;

    info!(
        source = %tree.root.display(),
        target = %client.base_url(),
        folders = tree.folders.len(),
        dashboards = tree.dashboard_count(),
        home = tree.home.is_some(),
        "Upload plan"
    );
    for folder in &tree.folders {
        debug!(folder = %folder.name, dashboards = folder.dashboards.len(), "Planned folder");
    }
    if !options.non_interactive {
        let prompt = format!(
            "Upload {} dashboards in {} folders to {}?",
            tree.dashboard_count(),
            tree.folders.len(),
            client.base_url()
        );
        if !confirm.confirm(&prompt) {
            return Err(SyncError::Aborted);
        }
    }

    let existing = client.list_folders().await?;
    let mut ensured = Vec::new();
    let mut destinations = Vec::with_capacity(tree.folders.len());
    for source in &tree.folders {
        let folder = ensure_folder(
            client,
            &existing,
            tree.manifest.as_ref(),
            source,
            options.overwrite,
        )
        .await?;
        destinations.push(folder.as_ref().map(|f| f.uid.clone()));
        ensured.extend(folder);
    }

    let mut target_folders = client.list_folders().await?;
    if find_folder_by_title(&target_folders, GENERAL_FOLDER_TITLE).is_none() {
        target_folders.push(Folder::general());
    }

    let mut uploaded = Vec::new();
    let mut uploaded_ids = HashMap::new();
    let mut failed = Vec::new();
    for (source, folder_uid) in tree.folders.iter().zip(&destinations) {
        for path in &source.dashboards {
            match upload_dashboard(client, path, folder_uid.as_ref(), &target_folders).await {
                Ok(saved) => {
                    info!(folder = %source.name, path = %path.display(), uid = %saved.uid, "Uploaded dashboard");
                    uploaded.push(path.clone());
                    uploaded_ids.insert(saved.uid, saved.id);
                }
                Err(e) => {
                    error!(folder = %source.name, path = %path.display(), error = %e, "Failed to upload dashboard");
                    failed.push(FailedUpload {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    let home = match (&tree.home, options.skip_home) {
        (Some(path), false) => {
            match upload_home(client, path, &target_folders, &uploaded_ids).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Home dashboard could not be set");
                    HomeOutcome::Failed(e.to_string())
                }
            }
        }
        _ => HomeOutcome::Skipped,
    };

    info!(
        folders = ensured.len(),
        uploaded = uploaded.len(),
        failed = failed.len(),
        home = ?home,
        "Upload finished"
    );

    Ok(UploadReport {
        folders: ensured,
        uploaded,
        failed,
        home,
    })
}

/// Resolve the folder a source directory uploads into. `None` is General.
async fn ensure_folder(
    client: &GrafanaClient,
    existing: &[Folder],
    manifest: Option<&FolderManifest>,
    source: &SourceFolder,
    overwrite: bool,
) -> Result<Option<Folder>> {
    let title = match &source.destination {
        FolderDestination::General => {
            debug!("General dashboards upload to the root");
            return Ok(None);
        }
        FolderDestination::Named(title) => title,
    };

    if let Some(folder) = find_folder_by_title(existing, title) {
        info!(folder = %title, uid = %folder.uid, "Using existing folder");
        return Ok(Some(folder.clone()));
    }

    let uid = resolve_folder_uid(existing, manifest, title);
    let folder = client.create_or_update_folder(title, &uid, overwrite).await?;
    info!(folder = %folder.title, uid = %folder.uid, id = %folder.id, "Folder ready");
    Ok(Some(folder))
}

async fn upload_dashboard(
    client: &GrafanaClient,
    path: &Path,
    folder_uid: Option<&FolderUid>,
    folders: &[Folder],
) -> Result<SavedDashboard> {
    let mut dashboard = DashboardDocument::try_from(read_json(path)?)?;
    rewrite_dashlist_folder_ids(&mut dashboard, folders, RewriteMode::Import);
    Ok(client
        .create_or_update_dashboard(dashboard, folder_uid, true)
        .await?)
}

async fn upload_home(
    client: &GrafanaClient,
    path: &Path,
    folders: &[Folder],
    uploaded: &HashMap<DashboardUid, DashboardId>,
) -> Result<HomeOutcome> {
    let mut dashboard = DashboardDocument::try_from(read_json(path)?)?;
    let uid = match dashboard.uid() {
        Some(uid) => uid,
        None => {
            let uid = DashboardUid::from(HOME_DASHBOARD_UID);
            dashboard.set_uid(&uid);
            uid
        }
    };

    let saved_id = match uploaded.get(&uid) {
        Some(id) => {
            debug!(uid = %uid, "Home dashboard was uploaded with its folder; not saving it again");
            *id
        }
        None => {
            rewrite_dashlist_folder_ids(&mut dashboard, folders, RewriteMode::Import);
            let saved = client.create_or_update_dashboard(dashboard, None, true).await?;
            info!(uid = %saved.uid, "Uploaded home dashboard");
            saved.id
        }
    };

    let response = match client.get_dashboard(&uid).await {
        Ok(response) => response,
        Err(e) if e.is_not_found() => {
            warn!(uid = %uid, "Home dashboard not found after upload; not setting it");
            return Ok(HomeOutcome::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    match HomePolicy::for_auth(client.auth_strategy()) {
        HomePolicy::StarOnly if response.meta.is_starred => {
            debug!(uid = %uid, "Home dashboard already starred");
            Ok(HomeOutcome::AlreadyStarred)
        }
        HomePolicy::StarOnly => {
            let id = response.dashboard.id().unwrap_or(saved_id);
            client.star_dashboard(id).await?;
            info!(uid = %uid, id = %id, "Starred home dashboard");
            Ok(HomeOutcome::Starred)
        }
        HomePolicy::SetOrgPreference => {
            client.set_home_dashboard(&uid).await?;
            info!(uid = %uid, "Set organization home dashboard");
            Ok(HomeOutcome::SetAsHome)
        }
    }
}
