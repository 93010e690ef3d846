//! Shared source walking for the architecture checks.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Every `.rs` file under `crates/<name>/` (or all crates when `name` is
/// `None`), skipping build output and this crate.
pub fn rust_files(crate_name: Option<&str>) -> Vec<PathBuf> {
    let mut dir = workspace_root().join("crates");
    if let Some(name) = crate_name {
        dir.push(name);
    }

    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            name != "target" && name != "architecture-tests"
        })
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Path relative to the workspace root, for messages.
pub fn display(path: &Path) -> String {
    path.strip_prefix(workspace_root())
        .unwrap_or(path)
        .display()
        .to_string()
}

pub fn is_test_source(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == "tests")
        || path.to_string_lossy().ends_with("_tests.rs")
}
