//! Organization preference and user star endpoints.

use reqwest::Client;

use crate::auth::AuthStrategy;
use crate::endpoints::{parse_json, send_request_with_retry};
use crate::error::Result;
use crate::models::{ApiMessage, DashboardId, DashboardUid, SetHomeDashboardRequest};

/// Set the organization's home dashboard.
pub async fn set_home_dashboard(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    uid: &DashboardUid,
    max_retries: usize,
) -> Result<ApiMessage> {
    let url = format!("{}/api/org/preferences", base_url);
    let builder = auth
        .apply(client.patch(&url))
        .json(&SetHomeDashboardRequest {
            home_dashboard_uid: uid,
        });
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "preferences update").await
}

/// Star a dashboard for the authenticated user.
pub async fn star_dashboard(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    id: DashboardId,
    max_retries: usize,
) -> Result<ApiMessage> {
    let url = format!("{}/api/user/stars/dashboard/{}", base_url, id);
    let builder = auth.apply(client.post(&url));
    let response = send_request_with_retry(builder, max_retries).await?;
    parse_json(response, "star").await
}
