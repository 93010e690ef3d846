//! `folders.json`: the folder inventory written next to a download.
//!
//! Maps folder title to the folder's id, uid and the dashboards it held at
//! download time. Upload only reads the uid from it; ids are recorded for
//! reference and never reused.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use grafana_client::{DashboardSearchResult, Folder, FolderId, FolderUid};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};
use crate::files::{read_json, write_json_pretty};

pub const MANIFEST_FILE_NAME: &str = "folders.json";

/// One folder in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: FolderId,
    pub uid: FolderUid,
    pub title: String,
    #[serde(default)]
    pub dashboards: Vec<DashboardSearchResult>,
}

/// Folder title to [`ManifestEntry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderManifest(BTreeMap<String, ManifestEntry>);

impl FolderManifest {
    pub fn insert(&mut self, folder: &Folder, dashboards: Vec<DashboardSearchResult>) {
        self.0.insert(
            folder.title.clone(),
            ManifestEntry {
                id: folder.id,
                uid: folder.uid.clone(),
                title: folder.title.clone(),
                dashboards,
            },
        );
    }

    pub fn get(&self, title: &str) -> Option<&ManifestEntry> {
        self.0.get(title)
    }

    /// Uid recorded for a folder title.
    pub fn uid_for(&self, title: &str) -> Option<&FolderUid> {
        self.0.get(title).map(|entry| &entry.uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total dashboards across all folders.
    pub fn dashboard_count(&self) -> usize {
        self.0.values().map(|entry| entry.dashboards.len()).sum()
    }

    /// Read `<dir>/folders.json`. A missing file is `Ok(None)`.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(MANIFEST_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        let value = read_json(&path)?;
        let manifest = serde_json::from_value(value).map_err(|e| SyncError::json(&path, e))?;
        Ok(Some(manifest))
    }

    /// Write `<dir>/folders.json` and return its path.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE_NAME);
        write_json_pretty(&path, self)?;
        Ok(path)
    }
}
