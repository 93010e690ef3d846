//! Output formatting for the inspection commands.
//!
//! Responsibilities:
//! - Format folder and dashboard lists as tab-separated tables.
//! - Render single resources as pretty JSON.
//!
//! Does NOT handle:
//! - Logging (stderr); everything here goes to stdout.

use anyhow::Result;
use grafana_client::{DashboardSearchResult, Folder};
use serde::Serialize;

const MISSING: &str = "-";

/// Pretty JSON of any API value.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn format_folders(folders: &[Folder]) -> String {
    if folders.is_empty() {
        return "No folders found.".to_string();
    }

    let mut output = String::from("ID\tUID\tTitle\n");
    for folder in folders {
        output.push_str(&format!("{}\t{}\t{}\n", folder.id, folder.uid, folder.title));
    }
    output
}

pub fn format_dashboards(dashboards: &[DashboardSearchResult]) -> String {
    if dashboards.is_empty() {
        return "No dashboards found.".to_string();
    }

    let mut output = String::from("UID\tTitle\tFolder\tStarred\n");
    for dashboard in dashboards {
        output.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            dashboard.uid,
            dashboard.title,
            dashboard.folder_title.as_deref().unwrap_or(MISSING),
            if dashboard.is_starred { "Yes" } else { "No" }
        ));
    }
    output
}
