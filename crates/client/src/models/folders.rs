//! Folder models.

use serde::{Deserialize, Serialize};

use super::ids::{FolderId, FolderUid, GENERAL_FOLDER_TITLE};

/// A Grafana dashboard folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub uid: FolderUid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Folder {
    /// The built-in root folder. `GET /api/folders` never lists it.
    pub fn general() -> Self {
        Self {
            id: FolderId::GENERAL,
            uid: FolderUid::general(),
            title: GENERAL_FOLDER_TITLE.to_string(),
            url: None,
        }
    }

    pub fn is_general(&self) -> bool {
        self.id.is_general()
    }
}

/// Body of `POST /api/folders`.
#[derive(Debug, Serialize)]
pub struct CreateFolderRequest<'a> {
    pub uid: &'a FolderUid,
    pub title: &'a str,
}

/// Body of `PUT /api/folders/{uid}`.
#[derive(Debug, Serialize)]
pub struct UpdateFolderRequest<'a> {
    pub title: &'a str,
    pub overwrite: bool,
}

/// Generic `{"message": ...}` acknowledgement returned by delete and star calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}
