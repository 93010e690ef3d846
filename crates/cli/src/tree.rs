//! Directory tree rendering, like the `tree` command, for the local
//! dashboard layout shown before an upload and after a download.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use grafana_sync::files::is_ignored;

/// Render `root` and everything under it, entries sorted by name, `.DS_Store`
/// skipped.
pub fn render_tree(root: &Path) -> Result<String> {
    let mut output = format!("{}\n", root.display());
    walk(root, "", &mut output)?;
    Ok(output)
}

fn walk(dir: &Path, prefix: &str, output: &mut String) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory '{}'", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| !is_ignored(&entry.file_name().to_string_lossy()))
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.file_name());

    let count = entries.len();
    for (index, entry) in entries.into_iter().enumerate() {
        let last = index + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        let name = entry.file_name();
        let path = entry.path();

        if path.is_dir() {
            output.push_str(&format!("{prefix}{branch}{}/\n", name.to_string_lossy()));
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            walk(&path, &child_prefix, output)?;
        } else {
            output.push_str(&format!("{prefix}{branch}{}\n", name.to_string_lossy()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("General")).unwrap();
        fs::create_dir_all(root.join("Team B")).unwrap();
        fs::write(root.join("General/root.json"), "{}").unwrap();
        fs::write(root.join("Team B/a.json"), "{}").unwrap();
        fs::write(root.join("Team B/b.json"), "{}").unwrap();
        fs::write(root.join("home.json"), "{}").unwrap();
        fs::write(root.join(".DS_Store"), "").unwrap();

        let rendered = render_tree(root).unwrap();
        let body: Vec<&str> = rendered.lines().skip(1).collect();
        assert_eq!(
            body,
            [
                "├── General/",
                "│   └── root.json",
                "├── Team B/",
                "│   ├── a.json",
                "│   └── b.json",
                "└── home.json",
            ]
        );
    }
}
