//! Dashboards command implementation.
//!
//! Responsibilities:
//! - List dashboards across folders, optionally filtered by title.
//! - Show one dashboard (body and metadata) as JSON.

use anyhow::Result;
use clap::Subcommand;
use grafana_client::{DashboardUid, GrafanaClient};

use crate::formatters::{format_dashboards, format_json};

#[derive(Subcommand, Debug)]
pub enum DashboardsCommand {
    /// List dashboards in every folder
    List {
        /// Only dashboards whose title contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one dashboard as JSON
    Get {
        /// Dashboard uid
        uid: String,
    },
}

pub async fn run(client: &GrafanaClient, command: DashboardsCommand) -> Result<()> {
    match command {
        DashboardsCommand::List { query, json } => {
            let dashboards = client.search_dashboards(query.as_deref()).await?;
            if json {
                println!("{}", format_json(&dashboards)?);
            } else {
                print!("{}", format_dashboards(&dashboards));
            }
        }
        DashboardsCommand::Get { uid } => {
            let dashboard = client.get_dashboard(&DashboardUid::new(uid)).await?;
            println!("{}", format_json(&dashboard)?);
        }
    }
    Ok(())
}
