//! Download: mirror a Grafana instance into a local tree.
//!
//! Responsibilities:
//! - Guard the destination directory, then list folders and their dashboards.
//! - Write every dashboard body as sorted-key JSON under its folder title.
//! - Write `home.json` and `folders.json` next to the folder directories.
//!
//! Does NOT handle:
//! - Creating the destination directory (it must already exist).
//!
//! Invariants:
//! - Listing failures stop the run; a dashboard that cannot be fetched or
//!   written is logged and skipped.
//! - A folder whose title is not a single path component is never written;
//!   its dashboards are reported as failed.
//! - Dashlist folder ids are rewritten against the listed folders before writing.

use std::collections::HashSet;
use std::path::PathBuf;

use grafana_client::{
    DashboardDocument, DashboardUid, Folder, GENERAL_FOLDER_TITLE, GrafanaClient,
};
use tracing::{error, info, warn};

use crate::destination::prepare_destination;
use crate::error::{Result, SyncError};
use crate::files::write_json_pretty;
use crate::identity::{dashboard_file_name, find_folder_by_title, folder_dir_name};
use crate::manifest::FolderManifest;
use crate::prompt::Confirm;
use crate::rewrite::{RewriteMode, rewrite_dashlist_folder_ids};
use crate::source::HOME_FILE_NAME;

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub destination: PathBuf,
    pub overwrite: bool,
    pub non_interactive: bool,
    pub skip_home: bool,
}

/// A dashboard that could not be fetched or written.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedDashboard {
    pub folder: String,
    pub title: String,
    pub uid: DashboardUid,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    /// Dashboard files written, in write order.
    pub saved: Vec<PathBuf>,
    pub failed: Vec<FailedDashboard>,
    pub home_written: bool,
    pub manifest_path: PathBuf,
}

/// Download every folder and dashboard into `options.destination`.
pub async fn download(
    client: &GrafanaClient,
    options: &DownloadOptions,
    confirm: &dyn Confirm,
) -> Result<DownloadReport> {
    let destination = options.destination.as_path();
    prepare_destination(
        destination,
        options.overwrite,
        options.non_interactive,
        confirm,
    )?;

    let mut folders = client.list_folders().await?;
    if find_folder_by_title(&folders, GENERAL_FOLDER_TITLE).is_none() {
        folders.push(Folder::general());
    }

    let mut manifest = FolderManifest::default();
    let mut plan = Vec::with_capacity(folders.len());
    for folder in &folders {
        let dashboards = client.dashboards_in_folder(folder.id).await?;
        info!(folder = %folder.title, uid = %folder.uid, dashboards = dashboards.len(), "Found folder");
        manifest.insert(folder, dashboards.clone());
        plan.push((folder, dashboards));
    }

    info!(
        source = %client.base_url(),
        destination = %destination.display(),
        folders = manifest.len(),
        dashboards = manifest.dashboard_count(),
        "Download plan"
    );
    if !options.non_interactive {
        let prompt = format!(
            "Download {} dashboards in {} folders from {} into '{}'?",
            manifest.dashboard_count(),
            manifest.len(),
            client.base_url(),
            destination.display()
        );
        if !confirm.confirm(&prompt) {
            return Err(SyncError::Aborted);
        }
    }

    let mut saved = Vec::new();
    let mut failed = Vec::new();
    let mut written = HashSet::new();

    for (folder, dashboards) in &plan {
        let Some(dir_name) = folder_dir_name(folder) else {
            error!(folder = %folder.title, uid = %folder.uid, "Folder title is not a valid directory name; skipping its dashboards");
            failed.extend(dashboards.iter().map(|summary| FailedDashboard {
                folder: folder.title.clone(),
                title: summary.title.clone(),
                uid: summary.uid.clone(),
                error: format!("Folder title '{}' is not a valid directory name", folder.title),
            }));
            continue;
        };
        let folder_dir = destination.join(dir_name);

        for summary in dashboards {
            let failure = |error: String| FailedDashboard {
                folder: folder.title.clone(),
                title: summary.title.clone(),
                uid: summary.uid.clone(),
                error,
            };

            let dashboard = match fetch_for_export(client, &summary.uid, &folders).await {
                Ok(dashboard) => dashboard,
                Err(e) => {
                    error!(folder = %folder.title, dashboard = %summary.title, uid = %summary.uid, error = %e, "Failed to download dashboard");
                    failed.push(failure(e.to_string()));
                    continue;
                }
            };

            let path = folder_dir.join(dashboard_file_name(&summary.title));
            if !written.insert(path.clone()) {
                warn!(path = %path.display(), uid = %summary.uid, "Another dashboard was already written to this file; overwriting it");
            }
            if let Err(e) = write_json_pretty(&path, &dashboard) {
                error!(folder = %folder.title, dashboard = %summary.title, uid = %summary.uid, error = %e, "Failed to save dashboard");
                failed.push(failure(e.to_string()));
                continue;
            }
            info!(folder = %folder.title, dashboard = %summary.title, path = %path.display(), "Saved dashboard");
            saved.push(path);
        }
    }

    let mut home_written = false;
    if !options.skip_home {
        match client.get_home_dashboard().await {
            Ok(mut home) => {
                rewrite_dashlist_folder_ids(&mut home.dashboard, &folders, RewriteMode::Export);
                let path = destination.join(HOME_FILE_NAME);
                match write_json_pretty(&path, &home.dashboard) {
                    Ok(()) => {
                        info!(path = %path.display(), "Saved home dashboard");
                        home_written = true;
                    }
                    Err(e) => warn!(error = %e, "Could not save the home dashboard"),
                }
            }
            Err(e) => warn!(error = %e, "Could not fetch the home dashboard; home.json not written"),
        }
    }

    let manifest_path = manifest.write(destination)?;
    info!(
        saved = saved.len(),
        failed = failed.len(),
        manifest = %manifest_path.display(),
        "Download finished"
    );

    Ok(DownloadReport {
        saved,
        failed,
        home_written,
        manifest_path,
    })
}

async fn fetch_for_export(
    client: &GrafanaClient,
    uid: &DashboardUid,
    folders: &[Folder],
) -> grafana_client::Result<DashboardDocument> {
    let mut response = client.get_dashboard(uid).await?;
    rewrite_dashlist_folder_ids(&mut response.dashboard, folders, RewriteMode::Export);
    Ok(response.dashboard)
}
