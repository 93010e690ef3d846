//! CLI command implementations.

pub mod dashboards;
pub mod download;
pub mod folders;
pub mod upload;
