//! Error taxonomy shared by the store, the operations and both front ends.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Invalid task number {}: the list has {len} task(s).", .index + 1)]
    InvalidIndex { index: usize, len: usize },

    #[error("Invalid task number '{0}'. Enter a number from the list.")]
    InvalidNumber(String),

    #[error("No backup file found at {}.", .0.display())]
    NoBackup(PathBuf),

    #[error("No history found at {}.", .0.display())]
    NoHistory(PathBuf),

    #[error("Nothing to undo.")]
    NothingToUndo,

    #[error("Malformed task file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Backup file {} is malformed, tasks left unchanged: {source}", .path.display())]
    BadBackup {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TodoError {
    /// Whether the condition should end the session instead of being
    /// reported and skipped.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Missing-resource conditions that are shown as plain information.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NoBackup(_) | Self::NoHistory(_) | Self::NothingToUndo)
    }

    /// Build an index error for a 0-based position.
    #[must_use]
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }
}
