//! Local source tree scanning for uploads.
//!
//! Responsibilities:
//! - Enumerate folder directories and their dashboard files in sorted order.
//! - Reject trees deeper than two levels before any network call.
//! - Locate `home.json` and load `folders.json` when present.
//!
//! Invariants:
//! - `.DS_Store` is ignored at both levels; other dot-prefixed names are
//!   folders or dashboards like any other.
//! - Only `*.json` files inside folder directories are dashboards.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::files::is_ignored;
use crate::identity::FolderDestination;
use crate::manifest::FolderManifest;

pub const HOME_FILE_NAME: &str = "home.json";

/// Uid given to the home dashboard when its document carries none.
pub const HOME_DASHBOARD_UID: &str = "home";

/// One top-level directory of the source tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFolder {
    /// Directory name, which is the folder title.
    pub name: String,
    pub destination: FolderDestination,
    pub path: PathBuf,
    /// Dashboard files, sorted by name.
    pub dashboards: Vec<PathBuf>,
}

/// A validated local tree ready for upload.
#[derive(Debug, Clone)]
pub struct SourceTree {
    pub root: PathBuf,
    pub folders: Vec<SourceFolder>,
    pub home: Option<PathBuf>,
    pub manifest: Option<FolderManifest>,
}

impl SourceTree {
    /// Scan and validate `root`.
    pub fn scan(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(SyncError::SourceNotFound(root.to_path_buf()));
        }

        let mut folders = Vec::new();
        for path in sorted_entries(root)? {
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                warn!(path = %path.display(), "Skipping directory with a non UTF-8 name");
                continue;
            };

            let mut dashboards = Vec::new();
            for file in sorted_entries(&path)? {
                if file.is_dir() {
                    return Err(SyncError::NestingTooDeep { path: file });
                }
                if file.extension().is_some_and(|ext| ext == "json") {
                    dashboards.push(file);
                } else {
                    debug!(path = %file.display(), "Ignoring non-JSON file");
                }
            }

            folders.push(SourceFolder {
                destination: FolderDestination::from_dir_name(&name),
                name,
                path,
                dashboards,
            });
        }

        let home_path = root.join(HOME_FILE_NAME);
        let home = if home_path.is_file() {
            Some(home_path)
        } else {
            warn!(root = %root.display(), "No home.json found; the home dashboard will not be set");
            None
        };

        let manifest = match FolderManifest::load(root) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable folders.json");
                None
            }
        };

        Ok(Self {
            root: root.to_path_buf(),
            folders,
            home,
            manifest,
        })
    }

    pub fn dashboard_count(&self) -> usize {
        self.folders.iter().map(|f| f.dashboards.len()).sum()
    }
}

/// Entries of `dir` other than OS metadata, sorted by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SyncError::io(dir, e))? {
        let entry = entry.map_err(|e| SyncError::io(dir, e))?;
        if is_ignored(&entry.file_name().to_string_lossy()) {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_scan_collects_sorted_folders_and_dashboards() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Team B/b.json"));
        touch(&root.join("Team B/a.json"));
        touch(&root.join("Team B/notes.txt"));
        touch(&root.join("General/root.json"));
        touch(&root.join("home.json"));
        touch(&root.join(".DS_Store"));
        touch(&root.join("Team B/.DS_Store"));
        touch(&root.join("Team B/.NET_Metrics.json"));

        let tree = SourceTree::scan(root).unwrap();

        let names: Vec<_> = tree.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["General", "Team B"]);
        assert_eq!(tree.folders[0].destination, FolderDestination::General);
        assert_eq!(
            tree.folders[1].dashboards,
            vec![
                root.join("Team B/.NET_Metrics.json"),
                root.join("Team B/a.json"),
                root.join("Team B/b.json")
            ]
        );
        assert_eq!(tree.home, Some(root.join("home.json")));
        assert_eq!(tree.dashboard_count(), 4);
        assert!(tree.manifest.is_none());
    }

    #[test]
    fn test_third_level_rejected() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Ops/Nested/deep.json"));

        match SourceTree::scan(dir.path()) {
            Err(SyncError::NestingTooDeep { path }) => {
                assert_eq!(path, dir.path().join("Ops/Nested"));
            }
            other => panic!("expected NestingTooDeep, got {other:?}"),
        }
    }

    #[test]
    fn test_dot_prefixed_folder_is_kept() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join(".ops/cpu.json"));

        let tree = SourceTree::scan(dir.path()).unwrap();
        assert_eq!(tree.folders.len(), 1);
        assert_eq!(
            tree.folders[0].destination,
            FolderDestination::Named(".ops".to_string())
        );
        assert_eq!(tree.dashboard_count(), 1);
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            SourceTree::scan(&dir.path().join("missing")),
            Err(SyncError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_missing_home_and_bad_manifest_are_tolerated() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Ops/cpu.json"));
        fs::write(dir.path().join("folders.json"), "not json").unwrap();

        let tree = SourceTree::scan(dir.path()).unwrap();
        assert!(tree.home.is_none());
        assert!(tree.manifest.is_none());
        assert_eq!(tree.dashboard_count(), 1);
    }
}
