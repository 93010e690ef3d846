//! REST API endpoint implementations.
//!
//! Each function performs exactly one HTTP round trip against `/api/...`
//! and is wrapped by a [`crate::GrafanaClient`] method.

mod dashboards;
mod folders;
mod preferences;
mod request;
mod search;

pub use dashboards::{get_dashboard, get_home_dashboard, save_dashboard};
pub use folders::{create_folder, delete_folder, get_folder, list_folders, update_folder};
pub use preferences::{set_home_dashboard, star_dashboard};
pub use request::{parse_json, send_request_with_retry};
pub use search::{search_dashboards, search_folder_dashboards};
