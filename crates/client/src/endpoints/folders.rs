//! Folder endpoints.

use reqwest::Client;
use tracing::debug;

use crate::auth::AuthStrategy;
use crate::endpoints::{parse_json, send_request_with_retry};
use crate::error::Result;
use crate::models::{ApiMessage, CreateFolderRequest, Folder, FolderUid, UpdateFolderRequest};

/// List all folders (`GET /api/folders`). The General folder is never included.
pub async fn list_folders(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<Vec<Folder>> {
    let url = format!("{}/api/folders", base_url);
    let builder = auth.apply(client.get(&url));
    let response = send_request_with_retry(builder, max_retries).await?;
    let folders: Vec<Folder> = parse_json(response, "folder list").await?;
    debug!(count = folders.len(), "Listed folders");
    Ok(folders)
}

/// Get one folder by uid.
pub async fn get_folder(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    uid: &FolderUid,
    max_retries: usize,
) -> Result<Folder> {
    let url = format!("{}/api/folders/{}", base_url, uid);
    let builder = auth.apply(client.get(&url));
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "folder").await
}

/// Create a folder with an explicit uid.
///
/// Grafana answers 409 or 412 when the uid or title is already taken.
pub async fn create_folder(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    title: &str,
    uid: &FolderUid,
    max_retries: usize,
) -> Result<Folder> {
    let url = format!("{}/api/folders", base_url);
    let builder = auth
        .apply(client.post(&url))
        .json(&CreateFolderRequest { uid, title });
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "created folder").await
}

/// Rename an existing folder, overwriting any concurrent version.
pub async fn update_folder(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    title: &str,
    uid: &FolderUid,
    max_retries: usize,
) -> Result<Folder> {
    let url = format!("{}/api/folders/{}", base_url, uid);
    let builder = auth.apply(client.put(&url)).json(&UpdateFolderRequest {
        title,
        overwrite: true,
    });
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "updated folder").await
}

/// Delete a folder and every dashboard in it.
pub async fn delete_folder(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    uid: &FolderUid,
    max_retries: usize,
) -> Result<ApiMessage> {
    let url = format!("{}/api/folders/{}", base_url, uid);
    let builder = auth.apply(client.delete(&url));
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "folder deletion").await
}
