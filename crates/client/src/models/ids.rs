//! Identifier newtypes.
//!
//! Grafana gives every folder and dashboard two identities: an integer `id`
//! assigned by the instance, and a string `uid` that survives export and
//! import. Keeping them as distinct types stops an instance-local id from
//! being written where a portable uid belongs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title of the built-in root folder.
pub const GENERAL_FOLDER_TITLE: &str = "General";

/// Uid used locally for the built-in root folder.
pub const GENERAL_FOLDER_UID: &str = "general";

/// Instance-local folder id. Never portable between Grafana instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(pub i64);

impl FolderId {
    /// The General folder always has id 0.
    pub const GENERAL: FolderId = FolderId(0);

    pub fn is_general(self) -> bool {
        self == Self::GENERAL
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instance-local dashboard id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardId(pub i64);

impl fmt::Display for DashboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Portable folder uid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderUid(String);

impl FolderUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn general() -> Self {
        Self(GENERAL_FOLDER_UID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderUid {
    fn from(uid: &str) -> Self {
        Self::new(uid)
    }
}

impl From<String> for FolderUid {
    fn from(uid: String) -> Self {
        Self(uid)
    }
}

/// Portable dashboard uid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardUid(String);

impl DashboardUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DashboardUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DashboardUid {
    fn from(uid: &str) -> Self {
        Self::new(uid)
    }
}

impl From<String> for DashboardUid {
    fn from(uid: String) -> Self {
        Self(uid)
    }
}
