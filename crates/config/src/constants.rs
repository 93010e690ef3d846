//! Centralized constants for the Grafana dashboard manager workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Maximum allowed retry count.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_HOST: &str = "GRAFANA_HOST";
pub const ENV_SCHEME: &str = "GRAFANA_SCHEME";
pub const ENV_PORT: &str = "GRAFANA_PORT";
pub const ENV_USERNAME: &str = "GRAFANA_USERNAME";
pub const ENV_PASSWORD: &str = "GRAFANA_PASSWORD";
pub const ENV_TOKEN: &str = "GRAFANA_TOKEN";
pub const ENV_ORG_ID: &str = "GRAFANA_ORG_ID";
pub const ENV_SKIP_VERIFY: &str = "GRAFANA_SKIP_VERIFY";
pub const ENV_TIMEOUT: &str = "GRAFANA_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "GRAFANA_MAX_RETRIES";
