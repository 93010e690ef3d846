//! Dashboard API methods for [`GrafanaClient`].
//!
//! # What this module handles:
//! - Listing the dashboards of a folder and free-text dashboard search
//! - Getting individual dashboards by uid
//! - Resolving the home dashboard, following a redirect to a uid
//! - Creating or updating a dashboard
//!
//! # What this module does NOT handle:
//! - Low-level dashboard endpoint HTTP calls (in [`crate::endpoints`])
//! - Rewriting dashboard contents (handled by the sync crate)

use tracing::debug;

use crate::client::GrafanaClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{
    DashboardDocument, DashboardResponse, DashboardSearchResult, DashboardUid, FolderId,
    FolderUid, HomeDashboard, SaveDashboardRequest, SavedDashboard, uid_from_redirect,
};

/// Version stamp recorded in the dashboard history of every save.
const SAVE_MESSAGE_PREFIX: &str = concat!(
    "Uploaded by grafana-dashboard-manager ",
    env!("CARGO_PKG_VERSION")
);

impl GrafanaClient {
    /// Dashboards directly inside the folder with the given id.
    ///
    /// `FolderId::GENERAL` (0) lists root-level dashboards.
    pub async fn dashboards_in_folder(
        &self,
        folder_id: FolderId,
    ) -> Result<Vec<DashboardSearchResult>> {
        endpoints::search_folder_dashboards(
            &self.http,
            &self.base_url,
            &self.auth,
            folder_id,
            self.max_retries,
        )
        .await
    }

    /// Search dashboards in all folders, optionally filtered by title.
    pub async fn search_dashboards(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<DashboardSearchResult>> {
        endpoints::search_dashboards(&self.http, &self.base_url, &self.auth, query, self.max_retries)
            .await
    }

    pub async fn get_dashboard(&self, uid: &DashboardUid) -> Result<DashboardResponse> {
        endpoints::get_dashboard(&self.http, &self.base_url, &self.auth, uid, self.max_retries)
            .await
    }

    /// Get the home dashboard.
    ///
    /// When a custom home dashboard is set Grafana returns a `redirectUri`;
    /// the uid is taken from it and the dashboard fetched by uid.
    pub async fn get_home_dashboard(&self) -> Result<DashboardResponse> {
        let home =
            endpoints::get_home_dashboard(&self.http, &self.base_url, &self.auth, self.max_retries)
                .await?;

        match home {
            HomeDashboard::Dashboard(response) => Ok(response),
            HomeDashboard::Redirect { redirect_uri } => {
                let uid = uid_from_redirect(&redirect_uri).ok_or_else(|| {
                    ClientError::InvalidResponse(format!(
                        "home dashboard redirect has no uid: {redirect_uri}"
                    ))
                })?;
                debug!(%uid, "Home dashboard redirects to uid");
                self.get_dashboard(&uid).await
            }
        }
    }

    /// Create or update a dashboard.
    ///
    /// The document's instance-local `id` is nulled first so the save matches
    /// on uid. `folder_uid == None` places the dashboard in General and the
    /// `folderUid` key is omitted from the request entirely.
    pub async fn create_or_update_dashboard(
        &self,
        mut dashboard: DashboardDocument,
        folder_uid: Option<&FolderUid>,
        overwrite: bool,
    ) -> Result<SavedDashboard> {
        dashboard.clear_instance_id();

        let request = SaveDashboardRequest {
            dashboard: &dashboard,
            folder_uid,
            message: format!(
                "{} at {}",
                SAVE_MESSAGE_PREFIX,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ),
            overwrite,
        };

        let saved = endpoints::save_dashboard(
            &self.http,
            &self.base_url,
            &self.auth,
            &request,
            self.max_retries,
        )
        .await?;
        debug!(uid = %saved.uid, status = ?saved.status, "Saved dashboard");
        Ok(saved)
    }
}
