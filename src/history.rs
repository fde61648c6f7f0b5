//! Append-only log of mutating actions.
//!
//! Each line reads `<timestamp> - <action>: <task name>`. The file is only ever
//! appended to and redisplayed verbatim; it is never parsed back.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::{Result, TodoError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Kinds of action recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deleted,
    Completed,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Deleted => "Deleted",
            Action::Completed => "Completed",
        })
    }
}

/// Handle on the history file.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single timestamped line.
    pub fn append(&self, action: Action, task_name: &str) -> Result<()> {
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(f, "{stamp} - {action}: {task_name}")?;
        debug!(%action, task = task_name, "history appended");
        Ok(())
    }

    /// Raw contents for display. A missing file reports `NoHistory`.
    pub fn read(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(TodoError::NoHistory(self.path.clone()));
        }
        Ok(fs::read_to_string(&self.path)?)
    }
}
