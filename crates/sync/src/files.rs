//! JSON file helpers shared by download and upload.
//!
//! Invariants:
//! - Written JSON is pretty-printed with object keys sorted at every level
//!   and ends with a newline, so repeated downloads produce identical files.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SyncError};

/// Finder metadata that does not count as directory content.
pub const IGNORED_FILE_NAMES: &[&str] = &[".DS_Store"];

/// Whether a directory entry is OS metadata rather than part of the tree.
///
/// Other dot-prefixed names are real content: a dashboard titled
/// `.NET Metrics` is saved as `.NET_Metrics.json`.
pub fn is_ignored(name: &str) -> bool {
    IGNORED_FILE_NAMES.contains(&name)
}

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| SyncError::json(path, e))
}

/// Write `value` as sorted-key pretty JSON, creating parent directories.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let value = serde_json::to_value(value).map_err(|e| SyncError::json(path, e))?;
    let mut rendered =
        serde_json::to_string_pretty(&sort_keys(value)).map_err(|e| SyncError::json(path, e))?;
    rendered.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }
    fs::write(path, rendered).map_err(|e| SyncError::io(path, e))
}

/// Rebuild objects with their keys in sorted order.
///
/// `serde_json::Map` keeps insertion order when `preserve_order` is enabled
/// anywhere in the dependency graph, so sorting is done explicitly.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
