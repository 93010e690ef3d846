//! Download destination guard.
//!
//! A download refuses to write into a non-empty directory unless the
//! operator said so (`--overwrite`, `--non-interactive`) or confirms.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::files::is_ignored;
use crate::prompt::Confirm;

/// Whether `dir` has no entries other than ignorable metadata files.
pub fn is_effectively_empty(dir: &Path) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| SyncError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SyncError::io(dir, e))?;
        if !is_ignored(&entry.file_name().to_string_lossy()) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Check the destination before any file is written.
pub fn prepare_destination(
    dir: &Path,
    overwrite: bool,
    non_interactive: bool,
    confirm: &dyn Confirm,
) -> Result<()> {
    if !dir.is_dir() {
        return Err(SyncError::DestinationNotFound(dir.to_path_buf()));
    }

    if is_effectively_empty(dir)? {
        debug!(destination = %dir.display(), "Destination is empty");
        return Ok(());
    }

    if overwrite || non_interactive {
        warn!(destination = %dir.display(), "Destination is not empty; existing files may be overwritten");
        return Ok(());
    }

    let prompt = format!(
        "Destination '{}' is not empty. Existing files may be overwritten. Continue?",
        dir.display()
    );
    if confirm.confirm(&prompt) {
        Ok(())
    } else {
        Err(SyncError::Aborted)
    }
}
