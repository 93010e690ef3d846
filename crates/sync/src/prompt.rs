//! Operator confirmation seam.
//!
//! The orchestrators never talk to a terminal directly; the binary supplies
//! an interactive implementation and tests supply canned answers.

/// Asks the operator a yes/no question.
pub trait Confirm: Send + Sync {
    /// Returns `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes to everything. Used for `--non-interactive` runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
