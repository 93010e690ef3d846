//! Dashboard endpoints.

use reqwest::Client;

use crate::auth::AuthStrategy;
use crate::endpoints::{parse_json, send_request_with_retry};
use crate::error::Result;
use crate::models::{
    DashboardResponse, DashboardUid, HomeDashboard, SaveDashboardRequest, SavedDashboard,
};

/// Get a dashboard and its metadata by uid.
pub async fn get_dashboard(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    uid: &DashboardUid,
    max_retries: usize,
) -> Result<DashboardResponse> {
    let url = format!("{}/api/dashboards/uid/{}", base_url, uid);
    let builder = auth.apply(client.get(&url));
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "dashboard").await
}

/// Get the home dashboard, which may be a redirect to a dashboard uid.
pub async fn get_home_dashboard(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<HomeDashboard> {
    let url = format!("{}/api/dashboards/home", base_url);
    let builder = auth.apply(client.get(&url));
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "home dashboard").await
}

/// Create or update a dashboard (`POST /api/dashboards/db`).
pub async fn save_dashboard(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    request: &SaveDashboardRequest<'_>,
    max_retries: usize,
) -> Result<SavedDashboard> {
    let url = format!("{}/api/dashboards/db", base_url);
    let builder = auth.apply(client.post(&url)).json(request);
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "saved dashboard").await
}
