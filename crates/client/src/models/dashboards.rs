//! Dashboard models.
//!
//! The dashboard body itself is kept as opaque JSON: the manager only reads
//! a few well-known keys (`id`, `uid`, `title`, `panels`, `rows`) and must
//! round-trip everything else untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{DashboardId, DashboardUid, FolderId, FolderUid};
use crate::error::ClientError;

/// A dashboard definition document (the `dashboard` object of the API).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardDocument(Map<String, Value>);

impl DashboardDocument {
    /// Dashboard title, if present.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Dashboard uid, if present and non-empty.
    pub fn uid(&self) -> Option<DashboardUid> {
        self.0
            .get("uid")
            .and_then(Value::as_str)
            .filter(|uid| !uid.is_empty())
            .map(DashboardUid::from)
    }

    pub fn set_uid(&mut self, uid: &DashboardUid) {
        self.0
            .insert("uid".to_string(), Value::String(uid.to_string()));
    }

    /// Instance-local id, if present.
    pub fn id(&self) -> Option<DashboardId> {
        self.0.get("id").and_then(Value::as_i64).map(DashboardId)
    }

    /// Null the instance-local `id` so a save creates or matches by uid.
    pub fn clear_instance_id(&mut self) {
        self.0.insert("id".to_string(), Value::Null);
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_object_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for DashboardDocument {
    type Error = ClientError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ClientError::InvalidResponse(
                "dashboard definition must be a JSON object".to_string(),
            )),
        }
    }
}

/// One row of `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DashboardId>,
    pub uid: DashboardUid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_uid: Option<FolderUid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_meta: Option<i64>,
}

/// Metadata returned next to a dashboard body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_uid: Option<FolderUid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Response of `GET /api/dashboards/uid/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub dashboard: DashboardDocument,
    #[serde(default)]
    pub meta: DashboardMeta,
}

/// Response of `GET /api/dashboards/home`.
///
/// When a custom home dashboard is configured Grafana answers with a redirect
/// to it instead of the dashboard body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HomeDashboard {
    Redirect {
        #[serde(rename = "redirectUri")]
        redirect_uri: String,
    },
    Dashboard(DashboardResponse),
}

/// Extract the dashboard uid from a redirect such as `/d/<uid>/<slug>`.
///
/// Tolerates a sub-path prefix (`/grafana/d/<uid>/<slug>`) and query strings.
pub fn uid_from_redirect(redirect_uri: &str) -> Option<DashboardUid> {
    let path = redirect_uri.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    segments.find(|segment| *segment == "d")?;
    segments.next().map(DashboardUid::from)
}

/// Body of `POST /api/dashboards/db`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDashboardRequest<'a> {
    pub dashboard: &'a DashboardDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_uid: Option<&'a FolderUid>,
    pub message: String,
    pub overwrite: bool,
}

/// Response of `POST /api/dashboards/db`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedDashboard {
    pub id: DashboardId,
    pub uid: DashboardUid,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
}
