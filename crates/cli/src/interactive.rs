//! Terminal prompts.
//!
//! Responsibilities:
//! - Ask yes/no questions through `dialoguer`.
//! - Refuse to prompt when stdin is not a terminal, so piped or scheduled
//!   runs fail instead of hanging.

use std::io::IsTerminal;

use grafana_sync::Confirm;
use tracing::warn;

/// Interactive yes/no prompt on the controlling terminal. Defaults to no.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if !std::io::stdin().is_terminal() {
            warn!("stdin is not a terminal; declining. Pass --non-interactive to skip prompts");
            return false;
        }

        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Ask before deleting something.
pub fn confirm_delete(item_name: &str, item_type: &str) -> bool {
    TerminalConfirm.confirm(&format!(
        "Are you sure you want to delete {} '{}'?",
        item_type, item_name
    ))
}
