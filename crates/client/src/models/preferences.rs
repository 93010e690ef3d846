//! Organization preference models.

use serde::Serialize;

use super::ids::DashboardUid;

/// Body of `PATCH /api/org/preferences` that changes only the home dashboard.
#[derive(Debug, Serialize)]
pub struct SetHomeDashboardRequest<'a> {
    #[serde(rename = "homeDashboardUID")]
    pub home_dashboard_uid: &'a DashboardUid,
}
