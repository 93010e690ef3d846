//! CLI exit codes and error rendering.
//!
//! Responsibilities:
//! - Define the process exit codes.
//! - Render an error for the terminal, with or without its cause chain.
//!
//! Invariants:
//! - Every failure exits with 1; scripts only distinguish success from failure.

/// Exit codes for grafana-dashboard-manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed. Individual dashboard failures are reported but
    /// do not change the exit code.
    Success = 0,

    /// Fatal precondition failure, unrecoverable API error or declined
    /// confirmation.
    GeneralError = 1,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&anyhow::Error> for ExitCode {
    fn from(_: &anyhow::Error) -> Self {
        ExitCode::GeneralError
    }
}

/// Top-level message only, or the whole `outer: inner: ...` chain when verbose.
pub fn render_error(err: &anyhow::Error, verbose: bool) -> String {
    if verbose {
        format!("{:#}", err)
    } else {
        err.to_string()
    }
}
