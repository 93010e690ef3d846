//! Configuration management for the Grafana dashboard manager.
//!
//! This crate provides types and loaders for managing Grafana connection
//! configuration from `.env` files, environment variables, and command-line
//! overrides. The resulting [`Config`] is built once at startup and passed by
//! reference to everything that talks to Grafana.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, Scheme};
