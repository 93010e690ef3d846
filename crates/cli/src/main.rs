//! grafana-dashboard-manager - back up and restore Grafana folders and dashboards.
//!
//! Responsibilities:
//! - Parse command-line arguments and build the connection config.
//! - Initialize logging to stderr.
//! - Run the selected command and map the outcome to an exit code.
//!
//! Does NOT handle:
//! - Grafana HTTP calls (see `crates/client`).
//! - Folder/dashboard reconciliation (see `crates/sync`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` values are visible.
//! - Logs go to stderr; command results go to stdout.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod interactive;
mod tree;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, render_error};
use grafana_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter for a verbosity count. `RUST_LOG` takes precedence.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info,hyper=warn,reqwest=warn",
        1 => "debug,hyper=info,reqwest=info",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose > 0))
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let verbose = cli.verbose > 0;

    let exit_code = match run_command(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {}", render_error(&e, verbose));
            ExitCode::from(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}
