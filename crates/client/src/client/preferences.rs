//! Home dashboard preference and star methods for [`GrafanaClient`].

use tracing::info;

use crate::client::GrafanaClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{DashboardId, DashboardUid};

impl GrafanaClient {
    /// Set the organization home dashboard. Requires an org admin token.
    pub async fn set_home_dashboard(&self, uid: &DashboardUid) -> Result<()> {
        endpoints::set_home_dashboard(&self.http, &self.base_url, &self.auth, uid, self.max_retries)
            .await?;
        info!(%uid, "Set organization home dashboard");
        Ok(())
    }

    /// Star a dashboard for the authenticated user.
    pub async fn star_dashboard(&self, id: DashboardId) -> Result<()> {
        let ack =
            endpoints::star_dashboard(&self.http, &self.base_url, &self.auth, id, self.max_retries)
                .await?;
        info!(%id, message = %ack.message, "Starred dashboard");
        Ok(())
    }
}
