//! Folders command implementation.
//!
//! Responsibilities:
//! - List, show, create, rename and delete folders.
//!
//! Invariants:
//! - `create` without `--uid` derives the uid the same way upload does.
//! - `delete` asks first unless `--force` is given.

use anyhow::{Result, bail};
use clap::Subcommand;
use grafana_client::{FolderUid, GrafanaClient};
use grafana_sync::identity::derive_uid_from_title;

use crate::formatters::{format_folders, format_json};
use crate::interactive::confirm_delete;

#[derive(Subcommand, Debug)]
pub enum FoldersCommand {
    /// List all folders
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one folder as JSON
    Get {
        /// Folder uid
        uid: String,
    },
    /// Create a folder
    Create {
        /// Folder title
        title: String,
        /// Folder uid (default: the title lowercased without whitespace)
        #[arg(long)]
        uid: Option<String>,
        /// Retitle the folder if the uid is already taken
        #[arg(long)]
        overwrite: bool,
    },
    /// Change a folder's title
    Update {
        /// Folder uid
        uid: String,
        /// New title
        title: String,
    },
    /// Delete a folder and every dashboard in it
    Delete {
        /// Folder uid
        uid: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(client: &GrafanaClient, command: FoldersCommand) -> Result<()> {
    match command {
        FoldersCommand::List { json } => {
            let folders = client.list_folders().await?;
            if json {
                println!("{}", format_json(&folders)?);
            } else {
                print!("{}", format_folders(&folders));
            }
        }
        FoldersCommand::Get { uid } => {
            let folder = client.get_folder(&FolderUid::new(uid)).await?;
            println!("{}", format_json(&folder)?);
        }
        FoldersCommand::Create {
            title,
            uid,
            overwrite,
        } => {
            let uid = uid.map(FolderUid::new).unwrap_or_else(|| derive_uid_from_title(&title));
            let folder = client.create_or_update_folder(&title, &uid, overwrite).await?;
            println!("{}", format_json(&folder)?);
        }
        FoldersCommand::Update { uid, title } => {
            let folder = client.rename_folder(&FolderUid::new(uid), &title).await?;
            println!("{}", format_json(&folder)?);
        }
        FoldersCommand::Delete { uid, force } => {
            if !force && !confirm_delete(&uid, "folder") {
                bail!("Aborted: folder '{}' was not deleted", uid);
            }
            let ack = client.delete_folder(&FolderUid::new(uid)).await?;
            println!("{}", ack.message);
        }
    }
    Ok(())
}
