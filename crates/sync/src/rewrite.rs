//! Dashlist folder reference rewriting.
//!
//! Responsibilities:
//! - Walk every panel of a dashboard regardless of layout (flat `panels`,
//!   legacy `rows[].panels[]`, collapsed rows with nested panels).
//! - Point dashlist panels at the target instance's folder ids.
//!
//! Does NOT handle:
//! - Any panel type other than `dashlist`.
//! - Fetching the folder list (callers pass the target's folders in).
//!
//! Invariants:
//! - A dashlist panel is matched to a folder by exact title; with no match
//!   the panel is left untouched.
//! - `options.folderUID` is only written when the key already exists.

use grafana_client::{DashboardDocument, Folder, FolderId};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::identity::find_folder_by_title;

const DASHLIST_PANEL_TYPE: &str = "dashlist";
const ROW_PANEL_TYPE: &str = "row";

/// Which side of the sync a rewrite runs on. Matching is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Download: folder list comes from the source instance.
    Export,
    /// Upload: folder list comes from the target instance.
    Import,
}

/// Where a dashboard keeps its panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLayout {
    /// Top-level `panels` array (wins when both are present).
    Panels,
    /// Legacy `rows[].panels[]`.
    Rows,
    /// Neither key.
    Empty,
}

/// One dashlist panel whose folder id changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRewrite {
    pub panel_title: String,
    pub from: Option<Value>,
    pub to: FolderId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewriteReport {
    pub layout: PanelLayout,
    pub rewrites: Vec<PanelRewrite>,
}

impl RewriteReport {
    pub fn is_noop(&self) -> bool {
        self.rewrites.is_empty()
    }
}

pub type PanelIter<'a> = Box<dyn Iterator<Item = &'a mut Map<String, Value>> + 'a>;

fn layout_of(dashboard: &Map<String, Value>) -> PanelLayout {
    if dashboard.get("panels").is_some_and(Value::is_array) {
        PanelLayout::Panels
    } else if dashboard.get("rows").is_some_and(Value::is_array) {
        PanelLayout::Rows
    } else {
        PanelLayout::Empty
    }
}

/// Lazily yield every panel object of a dashboard body.
pub fn panels_mut(dashboard: &mut Map<String, Value>) -> (PanelLayout, PanelIter<'_>) {
    let layout = layout_of(dashboard);
    let panels: PanelIter<'_> = match layout {
        PanelLayout::Panels => match dashboard.get_mut("panels") {
            Some(Value::Array(panels)) => flatten_rows(panels),
            _ => Box::new(std::iter::empty()),
        },
        PanelLayout::Rows => match dashboard.get_mut("rows") {
            Some(Value::Array(rows)) => Box::new(
                rows.iter_mut()
                    .filter_map(Value::as_object_mut)
                    .filter_map(|row| match row.get_mut("panels") {
                        Some(Value::Array(panels)) => Some(panels),
                        _ => None,
                    })
                    .flat_map(|panels| panels.iter_mut().filter_map(Value::as_object_mut)),
            ),
            _ => Box::new(std::iter::empty()),
        },
        PanelLayout::Empty => Box::new(std::iter::empty()),
    };
    (layout, panels)
}

/// Collapsed `row` panels hold their children in a nested `panels` array.
fn flatten_rows<'a>(panels: &'a mut [Value]) -> PanelIter<'a> {
    Box::new(
        panels
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .flat_map(|panel: &'a mut Map<String, Value>| -> PanelIter<'a> {
                let is_collapsed_row = panel.get("type").and_then(Value::as_str)
                    == Some(ROW_PANEL_TYPE)
                    && panel.get("panels").is_some_and(Value::is_array);
                if !is_collapsed_row {
                    return Box::new(std::iter::once(panel));
                }
                match panel.get_mut("panels") {
                    Some(Value::Array(nested)) => {
                        Box::new(nested.iter_mut().filter_map(Value::as_object_mut))
                    }
                    _ => Box::new(std::iter::empty()),
                }
            }),
    )
}

/// Point every dashlist panel at the folder whose title equals the panel title.
pub fn rewrite_dashlist_folder_ids(
    dashboard: &mut DashboardDocument,
    folders: &[Folder],
    mode: RewriteMode,
) -> RewriteReport {
    let dashboard_title = dashboard.title().unwrap_or_default().to_string();
    let (layout, panels) = panels_mut(dashboard.as_object_mut());
    let mut rewrites = Vec::new();

    for panel in panels {
        if panel.get("type").and_then(Value::as_str) != Some(DASHLIST_PANEL_TYPE) {
            continue;
        }
        let Some(panel_title) = panel.get("title").and_then(Value::as_str) else {
            continue;
        };
        let panel_title = panel_title.to_string();
        let Some(folder) = find_folder_by_title(folders, &panel_title) else {
            debug!(dashboard = %dashboard_title, panel = %panel_title, "No folder matches dashlist panel title");
            continue;
        };

        let options = panel
            .entry("options")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(options) = options.as_object_mut() else {
            warn!(dashboard = %dashboard_title, panel = %panel_title, "Dashlist options is not an object, skipping");
            continue;
        };

        let target = Value::from(folder.id.0);
        let current = options.get("folderId").cloned();
        if current.as_ref() == Some(&target) {
            debug!(dashboard = %dashboard_title, panel = %panel_title, folder_id = folder.id.0, "Dashlist folder id already correct");
            continue;
        }

        options.insert("folderId".to_string(), target);
        if options.contains_key("folderUID") {
            options.insert(
                "folderUID".to_string(),
                Value::String(folder.uid.to_string()),
            );
        }

        match mode {
            RewriteMode::Export => debug!(
                dashboard = %dashboard_title,
                panel = %panel_title,
                from = ?current,
                to = folder.id.0,
                "Rewrote dashlist folder id"
            ),
            RewriteMode::Import => info!(
                dashboard = %dashboard_title,
                panel = %panel_title,
                from = ?current,
                to = folder.id.0,
                "Rewrote dashlist folder id"
            ),
        }

        rewrites.push(PanelRewrite {
            panel_title,
            from: current,
            to: folder.id,
        });
    }

    if layout == PanelLayout::Empty {
        warn!(dashboard = %dashboard_title, "Dashboard has neither panels nor rows");
    }

    RewriteReport { layout, rewrites }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grafana_client::FolderUid;
    use serde_json::json;

    fn folders() -> Vec<Folder> {
        vec![
            Folder {
                id: FolderId(1),
                uid: FolderUid::new("ops"),
                title: "Operations".to_string(),
                url: None,
            },
            Folder {
                id: FolderId(7),
                uid: FolderUid::new("teamb"),
                title: "Team B".to_string(),
                url: None,
            },
        ]
    }

    fn doc(value: Value) -> DashboardDocument {
        DashboardDocument::try_from(value).unwrap()
    }

    #[test]
    fn test_rewrites_flat_panels() {
        let mut dashboard = doc(json!({
            "title": "Links",
            "panels": [
                {"type": "graph", "title": "Team B"},
                {"type": "dashlist", "title": "Team B", "options": {"folderId": 2}},
                {"type": "dashlist", "title": "Unknown", "options": {"folderId": 3}}
            ]
        }));

        let report = rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Import);

        assert_eq!(report.layout, PanelLayout::Panels);
        assert_eq!(report.rewrites.len(), 1);
        assert_eq!(report.rewrites[0].from, Some(json!(2)));
        assert_eq!(report.rewrites[0].to, FolderId(7));
        let panels = &dashboard.as_object()["panels"];
        assert_eq!(panels[1]["options"]["folderId"], 7);
        assert_eq!(panels[2]["options"]["folderId"], 3);
        assert!(panels[0].get("options").is_none());
    }

    #[test]
    fn test_rewrites_legacy_rows() {
        let mut dashboard = doc(json!({
            "rows": [
                {"panels": [{"type": "dashlist", "title": "Operations", "options": {"folderId": 99}}]},
                {"panels": []}
            ]
        }));

        let report = rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Export);

        assert_eq!(report.layout, PanelLayout::Rows);
        assert_eq!(
            dashboard.as_object()["rows"][0]["panels"][0]["options"]["folderId"],
            1
        );
    }

    #[test]
    fn test_panels_win_over_rows() {
        let mut dashboard = doc(json!({
            "panels": [],
            "rows": [{"panels": [{"type": "dashlist", "title": "Operations"}]}]
        }));

        let report = rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Import);

        assert_eq!(report.layout, PanelLayout::Panels);
        assert!(report.is_noop());
    }

    #[test]
    fn test_collapsed_row_children_are_visited() {
        let mut dashboard = doc(json!({
            "panels": [{
                "type": "row",
                "collapsed": true,
                "panels": [{"type": "dashlist", "title": "Team B", "options": {"folderId": 1}}]
            }]
        }));

        rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Import);

        assert_eq!(
            dashboard.as_object()["panels"][0]["panels"][0]["options"]["folderId"],
            7
        );
    }

    #[test]
    fn test_folder_uid_only_written_when_present() {
        let mut dashboard = doc(json!({
            "panels": [
                {"type": "dashlist", "title": "Team B", "options": {"folderId": 2, "folderUID": "old"}},
                {"type": "dashlist", "title": "Operations"}
            ]
        }));

        rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Import);

        let panels = &dashboard.as_object()["panels"];
        assert_eq!(panels[0]["options"]["folderUID"], "teamb");
        assert_eq!(panels[1]["options"], json!({"folderId": 1}));
    }

    #[test]
    fn test_matching_ids_are_a_noop() {
        let original = json!({
            "panels": [{"type": "dashlist", "title": "Team B", "options": {"folderId": 7}}]
        });
        let mut dashboard = doc(original.clone());

        let report = rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Import);

        assert!(report.is_noop());
        assert_eq!(dashboard.into_json(), original);
    }

    #[test]
    fn test_empty_dashboard_reports_empty_layout() {
        let mut dashboard = doc(json!({"title": "Blank"}));
        let report = rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Export);
        assert_eq!(report.layout, PanelLayout::Empty);
        assert!(report.is_noop());
    }

    #[test]
    fn test_non_object_options_left_alone() {
        let original = json!({
            "panels": [{"type": "dashlist", "title": "Team B", "options": "legacy"}]
        });
        let mut dashboard = doc(original.clone());

        let report = rewrite_dashlist_folder_ids(&mut dashboard, &folders(), RewriteMode::Import);

        assert!(report.is_noop());
        assert_eq!(dashboard.into_json(), original);
    }
}
