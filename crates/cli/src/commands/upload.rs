//! Upload command implementation.
//!
//! Responsibilities:
//! - Show the local tree, run the upload and print a summary.
//!
//! Does NOT handle:
//! - Tree validation or any Grafana call (see `grafana_sync::upload`).

use anyhow::Result;
use grafana_client::GrafanaClient;
use grafana_sync::{HomeOutcome, UploadOptions, upload};
use tracing::warn;

use crate::args::UploadArgs;
use crate::interactive::TerminalConfirm;
use crate::tree::render_tree;

pub async fn run(client: &GrafanaClient, args: UploadArgs) -> Result<()> {
    let options = UploadOptions {
        source: args.source,
        overwrite: args.overwrite,
        non_interactive: args.non_interactive,
        skip_home: args.skip_home,
    };

    if options.source.is_dir() {
        println!("{}", render_tree(&options.source)?);
    }

    let report = upload(client, &options, &TerminalConfirm).await?;

    println!(
        "Uploaded {} dashboards ({} folders) to {}",
        report.uploaded.len(),
        report.folders.len(),
        client.base_url()
    );
    match &report.home {
        HomeOutcome::Skipped => {}
        HomeOutcome::NotFound => println!("Home dashboard: not found after upload"),
        HomeOutcome::Starred => println!("Home dashboard: starred"),
        HomeOutcome::AlreadyStarred => println!("Home dashboard: already starred"),
        HomeOutcome::SetAsHome => println!("Home dashboard: set for the organization"),
        HomeOutcome::Failed(reason) => println!("Home dashboard: failed ({reason})"),
    }
    if !report.failed.is_empty() {
        warn!(count = report.failed.len(), "Some dashboards were not uploaded");
        for failure in &report.failed {
            println!("FAILED {}: {}", failure.path.display(), failure.error);
        }
    }
    Ok(())
}
