//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the configuration and the Grafana client.
//! - Route parsed CLI arguments to the command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).

use anyhow::Result;
use grafana_client::GrafanaClient;
use grafana_config::Config;

use crate::args::{Cli, Commands, ConnectionArgs};
use crate::commands;

/// Flags first, then `GRAFANA_*` variables for anything left unset.
fn build_config(connection: &ConnectionArgs) -> Result<Config> {
    Ok(connection.to_loader().from_env()?.build()?)
}

fn build_client(config: &Config) -> Result<GrafanaClient> {
    Ok(GrafanaClient::builder().from_config(config).build()?)
}

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli) -> Result<()> {
    let config = build_config(&cli.connection)?;
    let client = build_client(&config)?;

    match cli.command {
        Commands::Upload(args) => commands::upload::run(&client, args).await,
        Commands::Download(args) => commands::download::run(&client, args).await,
        Commands::Folders { command } => commands::folders::run(&client, command).await,
        Commands::Dashboards { command } => commands::dashboards::run(&client, command).await,
    }
}
