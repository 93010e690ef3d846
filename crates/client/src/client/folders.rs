//! Folder API methods for [`GrafanaClient`].
//!
//! # What this module handles:
//! - Listing folders and fetching one by uid
//! - Create-or-update of a folder with a caller-chosen uid
//! - Renaming a folder by uid
//! - Deleting folders
//!
//! # What this module does NOT handle:
//! - Low-level folder endpoint HTTP calls (in [`crate::endpoints`])
//! - Choosing which uid a folder should get (handled by the sync crate)

use tracing::{debug, info};

use crate::client::GrafanaClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{ApiMessage, Folder, FolderUid};

/// Steps of the folder write state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FolderWrite {
    Create,
    Update,
}

impl GrafanaClient {
    /// List all folders, excluding the built-in General folder.
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        endpoints::list_folders(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }

    pub async fn get_folder(&self, uid: &FolderUid) -> Result<Folder> {
        endpoints::get_folder(&self.http, &self.base_url, &self.auth, uid, self.max_retries).await
    }

    /// Create a folder, or update the existing one on conflict.
    ///
    /// `Create` is tried first. A 409/412 conflict moves to `Update` when
    /// `overwrite` is set and fails with [`ClientError::FolderExists`]
    /// otherwise. An `Update` failure is final.
    pub async fn create_or_update_folder(
        &self,
        title: &str,
        uid: &FolderUid,
        overwrite: bool,
    ) -> Result<Folder> {
        let mut step = FolderWrite::Create;
        loop {
            match step {
                FolderWrite::Create => {
                    match endpoints::create_folder(
                        &self.http,
                        &self.base_url,
                        &self.auth,
                        title,
                        uid,
                        self.max_retries,
                    )
                    .await
                    {
                        Ok(folder) => {
                            info!(title, uid = %folder.uid, "Created folder");
                            return Ok(folder);
                        }
                        Err(e) if e.is_conflict() => {
                            if !overwrite {
                                return Err(ClientError::FolderExists {
                                    title: title.to_string(),
                                    uid: uid.to_string(),
                                });
                            }
                            debug!(title, %uid, error = %e, "Folder exists, updating instead");
                            step = FolderWrite::Update;
                        }
                        Err(e) => return Err(e),
                    }
                }
                FolderWrite::Update => {
                    let folder = endpoints::update_folder(
                        &self.http,
                        &self.base_url,
                        &self.auth,
                        title,
                        uid,
                        self.max_retries,
                    )
                    .await?;
                    info!(title, uid = %folder.uid, "Updated folder");
                    return Ok(folder);
                }
            }
        }
    }

    /// Retitle an existing folder. Fails with 404 when the uid is unknown.
    pub async fn rename_folder(&self, uid: &FolderUid, title: &str) -> Result<Folder> {
        let folder = endpoints::update_folder(
            &self.http,
            &self.base_url,
            &self.auth,
            title,
            uid,
            self.max_retries,
        )
        .await?;
        info!(title, uid = %folder.uid, "Renamed folder");
        Ok(folder)
    }

    /// Delete a folder by uid. Grafana deletes the dashboards inside it too.
    pub async fn delete_folder(&self, uid: &FolderUid) -> Result<ApiMessage> {
        endpoints::delete_folder(&self.http, &self.base_url, &self.auth, uid, self.max_retries)
            .await
    }
}
