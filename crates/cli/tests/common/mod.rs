//! Shared test utilities for grafana-dashboard-manager integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that prevents dotenv loading.
//!
//! Invariants / Assumptions:
//! - No `GRAFANA_*` variable leaks in from the host environment.
//! - `GRAFANA_TOKEN` is set to "test-token" unless overridden.

#![allow(dead_code)]

use assert_cmd::Command;

const GRAFANA_VARS: &[&str] = &[
    "GRAFANA_HOST",
    "GRAFANA_SCHEME",
    "GRAFANA_PORT",
    "GRAFANA_USERNAME",
    "GRAFANA_PASSWORD",
    "GRAFANA_TOKEN",
    "GRAFANA_ORG_ID",
    "GRAFANA_SKIP_VERIFY",
    "GRAFANA_TIMEOUT",
    "GRAFANA_MAX_RETRIES",
    "RUST_LOG",
];

/// A hermetic command with no host configured.
pub fn gdm_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("grafana-dashboard-manager");
    cmd.env("DOTENV_DISABLED", "1");
    for var in GRAFANA_VARS {
        cmd.env_remove(var);
    }
    cmd.env("GRAFANA_TOKEN", "test-token");
    cmd.env("GRAFANA_MAX_RETRIES", "0");
    cmd
}

/// A hermetic command pointed at `host` (e.g. a wiremock URI).
pub fn gdm_cmd_for(host: &str) -> Command {
    let mut cmd = gdm_cmd();
    cmd.env("GRAFANA_HOST", host);
    cmd
}
