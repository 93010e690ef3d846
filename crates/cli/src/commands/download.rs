//! Download command implementation.

use anyhow::Result;
use grafana_client::GrafanaClient;
use grafana_sync::{DownloadOptions, download};
use tracing::warn;

use crate::args::DownloadArgs;
use crate::interactive::TerminalConfirm;
use crate::tree::render_tree;

pub async fn run(client: &GrafanaClient, args: DownloadArgs) -> Result<()> {
    let options = DownloadOptions {
        destination: args.destination,
        overwrite: args.overwrite,
        non_interactive: args.non_interactive,
        skip_home: args.skip_home,
    };

    let report = download(client, &options, &TerminalConfirm).await?;

    println!("{}", render_tree(&options.destination)?);
    println!(
        "Downloaded {} dashboards from {} into {}",
        report.saved.len(),
        client.base_url(),
        options.destination.display()
    );
    if !report.failed.is_empty() {
        warn!(count = report.failed.len(), "Some dashboards were not downloaded");
        for failure in &report.failed {
            println!(
                "FAILED {}/{} ({}): {}",
                failure.folder, failure.title, failure.uid, failure.error
            );
        }
    }
    Ok(())
}
