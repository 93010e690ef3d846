//! Identity resolution between Grafana folders and local directories.
//!
//! Responsibilities:
//! - Map folder titles to uids and back to directory names.
//! - Derive a portable uid for a folder that does not exist yet.
//! - Name dashboard files from dashboard titles.
//!
//! Invariants:
//! - Folder ids are instance-local and never used as identity across instances.
//! - The `General` directory is the root "no folder" destination; it is never
//!   created through the folder API.

use std::path::{Component, Path};

use grafana_client::{Folder, FolderUid, GENERAL_FOLDER_TITLE};

use crate::manifest::FolderManifest;

/// Where the dashboards of one local directory end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderDestination {
    /// Root level, no folder uid sent.
    General,
    /// A real folder with this title.
    Named(String),
}

impl FolderDestination {
    /// Directory name to destination.
    pub fn from_dir_name(name: &str) -> Self {
        if name == GENERAL_FOLDER_TITLE {
            Self::General
        } else {
            Self::Named(name.to_string())
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::General => GENERAL_FOLDER_TITLE,
            Self::Named(title) => title,
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Self::General)
    }
}

/// Find a folder whose title matches exactly.
pub fn find_folder_by_title<'a>(folders: &'a [Folder], title: &str) -> Option<&'a Folder> {
    folders.iter().find(|folder| folder.title == title)
}

/// Uid of the folder with this exact title. `None` means it must be created.
pub fn folder_title_to_uid<'a>(folders: &'a [Folder], title: &str) -> Option<&'a FolderUid> {
    find_folder_by_title(folders, title).map(|folder| &folder.uid)
}

/// Uid for a new folder: the title lowercased with all whitespace removed.
pub fn derive_uid_from_title(title: &str) -> FolderUid {
    let uid: String = title
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    FolderUid::new(uid)
}

/// Local directory name for a folder.
pub fn local_folder_key(folder: &Folder) -> &str {
    &folder.title
}

/// Directory name for a folder, or `None` when the title is not a single
/// plain path component (`Infra/Network`, `..`, `/abs`, empty).
pub fn folder_dir_name(folder: &Folder) -> Option<&str> {
    let title = local_folder_key(folder);
    let mut components = Path::new(title).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == title => Some(title),
        _ => None,
    }
}

/// File name for a dashboard: path separators become `-`, spaces `_`.
pub fn dashboard_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            ' ' => '_',
            other => other,
        })
        .collect();
    format!("{stem}.json")
}

/// Choose the uid for a folder title.
///
/// Order: an existing folder with the same title, then the uid recorded in
/// `folders.json`, then a uid derived from the title.
pub fn resolve_folder_uid(
    existing: &[Folder],
    manifest: Option<&FolderManifest>,
    title: &str,
) -> FolderUid {
    if let Some(uid) = folder_title_to_uid(existing, title) {
        return uid.clone();
    }
    if let Some(uid) = manifest.and_then(|m| m.uid_for(title)) {
        return uid.clone();
    }
    derive_uid_from_title(title)
}
