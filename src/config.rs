//! File locations.
//!
//! All state lives in one data directory, `.` unless `--dir` says otherwise.
//! The file names inside it are fixed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const TASK_FILE: &str = "tasks.json";
pub const BACKUP_FILE: &str = "tasks_backup.json";
pub const HISTORY_FILE: &str = "history.log";
pub const EXPORT_FILE: &str = "tasks_export.csv";

/// Resolved paths for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub dir: PathBuf,
    pub tasks: PathBuf,
    pub backup: PathBuf,
    pub history: PathBuf,
    pub export: PathBuf,
}

impl Paths {
    pub fn in_dir(dir: &Path) -> Self {
        Paths {
            dir: dir.to_path_buf(),
            tasks: dir.join(TASK_FILE),
            backup: dir.join(BACKUP_FILE),
            history: dir.join(HISTORY_FILE),
            export: dir.join(EXPORT_FILE),
        }
    }

    /// Resolve from the optional `--dir` flag, creating the directory if needed.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        let dir = dir.unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        Ok(Paths::in_dir(dir))
    }
}
