//! Dashboard search endpoint.

use reqwest::Client;

use crate::auth::AuthStrategy;
use crate::endpoints::{parse_json, send_request_with_retry};
use crate::error::Result;
use crate::models::{DashboardSearchResult, FolderId};

const DASHBOARD_TYPE: &str = "dash-db";

/// Dashboards directly inside one folder (`folderIds` filter, dashboards only).
pub async fn search_folder_dashboards(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    folder_id: FolderId,
    max_retries: usize,
) -> Result<Vec<DashboardSearchResult>> {
    let url = format!("{}/api/search", base_url);
    let params = [
        ("folderIds", folder_id.to_string()),
        ("type", DASHBOARD_TYPE.to_string()),
    ];
    let builder = auth.apply(client.get(&url)).query(&params);
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "dashboard search results").await
}

/// Search dashboards across all folders, optionally filtered by a title query.
pub async fn search_dashboards(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    query: Option<&str>,
    max_retries: usize,
) -> Result<Vec<DashboardSearchResult>> {
    let url = format!("{}/api/search", base_url);
    let mut params = vec![("type", DASHBOARD_TYPE.to_string())];
    if let Some(q) = query {
        params.push(("query", q.to_string()));
    }
    let builder = auth.apply(client.get(&url)).query(&params);
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "dashboard search results").await
}
