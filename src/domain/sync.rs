//! Repository sync values

use chrono::NaiveDateTime;

/// Timestamp format used in auto-update commit messages
pub const COMMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Commit message for an automatic content update
pub fn commit_message(now: NaiveDateTime) -> String {
    format!("auto-update {}", now.format(COMMIT_TIME_FORMAT))
}

/// Result of a repository sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Working tree was clean, nothing committed
    Clean,
    /// Changes were committed and pushed
    Committed {
        message: String,
        /// Porcelain status lines of the committed changes
        changes: Vec<String>,
    },
}
