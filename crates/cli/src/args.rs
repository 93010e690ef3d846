//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Turn the global connection flags into a [`ConfigLoader`].
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `GRAFANA_*` variables itself; `ConfigLoader::from_env`
//!   fills whatever the flags left unset.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use grafana_config::{ConfigLoader, Scheme};

use crate::commands;

#[derive(Parser, Debug)]
#[command(name = "grafana-dashboard-manager")]
#[command(
    about = "Back up and restore Grafana folders and dashboards as local JSON files",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  grafana-dashboard-manager --host grafana.example.com -t $TOKEN download --destination ./backup\n  grafana-dashboard-manager --host http://localhost:3000 -u admin -p admin upload --source ./backup --non-interactive\n  grafana-dashboard-manager folders list\n\nEvery connection flag falls back to a GRAFANA_* environment variable (GRAFANA_HOST, GRAFANA_TOKEN, ...), also read from .env.\n"
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Grafana host, optionally with scheme and port (e.g. https://grafana.example.com:3000) [env: GRAFANA_HOST]
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// URL scheme when --host has none: http or https [env: GRAFANA_SCHEME]
    #[arg(long, global = true)]
    pub scheme: Option<Scheme>,

    /// Port, overriding any port in --host [env: GRAFANA_PORT]
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Username for basic auth [env: GRAFANA_USERNAME]
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for basic auth [env: GRAFANA_PASSWORD]
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// API token (service account or API key), preferred over basic auth [env: GRAFANA_TOKEN]
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Organization id [env: GRAFANA_ORG_ID]
    #[arg(short = 'o', long = "org", global = true, value_name = "ORG_ID")]
    pub org_id: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates) [env: GRAFANA_SKIP_VERIFY]
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Request timeout in seconds [env: GRAFANA_TIMEOUT]
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Retries for rate-limited (HTTP 429) requests [env: GRAFANA_MAX_RETRIES]
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,
}

impl ConnectionArgs {
    /// Loader carrying the explicitly passed flags.
    pub fn to_loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if let Some(host) = &self.host {
            loader = loader.with_host(host.clone());
        }
        if let Some(scheme) = self.scheme {
            loader = loader.with_scheme(scheme);
        }
        if let Some(port) = self.port {
            loader = loader.with_port(port);
        }
        if let Some(username) = &self.username {
            loader = loader.with_username(username.clone());
        }
        if let Some(password) = &self.password {
            loader = loader.with_password(password.clone());
        }
        if let Some(token) = &self.token {
            loader = loader.with_token(token.clone());
        }
        if let Some(org_id) = self.org_id {
            loader = loader.with_org_id(org_id);
        }
        if self.skip_verify {
            loader = loader.with_skip_verify(true);
        }
        if let Some(secs) = self.timeout {
            loader = loader.with_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.max_retries {
            loader = loader.with_max_retries(retries);
        }
        loader
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a local folder tree into Grafana
    Upload(UploadArgs),

    /// Download every folder and dashboard into a local folder tree
    Download(DownloadArgs),

    /// Inspect and manage folders
    Folders {
        #[command(subcommand)]
        command: commands::folders::FoldersCommand,
    },

    /// Inspect dashboards
    Dashboards {
        #[command(subcommand)]
        command: commands::dashboards::DashboardsCommand,
    },
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Directory holding <Folder>/<Dashboard>.json files
    #[arg(short, long, value_name = "DIR")]
    pub source: PathBuf,

    /// Update folders that already exist with the same uid
    #[arg(long)]
    pub overwrite: bool,

    /// Do not ask for confirmation
    #[arg(long)]
    pub non_interactive: bool,

    /// Do not upload home.json or change the home dashboard
    #[arg(long)]
    pub skip_home: bool,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Existing directory to write into
    #[arg(short, long, value_name = "DIR")]
    pub destination: PathBuf,

    /// Write into a non-empty destination without asking
    #[arg(long)]
    pub overwrite: bool,

    /// Do not ask for confirmation
    #[arg(long)]
    pub non_interactive: bool,

    /// Do not download the home dashboard
    #[arg(long)]
    pub skip_home: bool,
}
