//! Task store: the ordered task list and its JSON file.
//!
//! The file is a bare JSON array of task records. It is rewritten in full on
//! every save, through a temporary file and a rename so an interrupted write
//! never leaves a truncated store behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TodoError};
use crate::task::Task;

/// In-memory task store. Order is insertion order unless explicitly sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    pub fn new(tasks: Vec<Task>) -> Self {
        Database { tasks }
    }

    /// Load the store from `path`. A missing file yields an empty store; a file
    /// that exists but does not parse is a fatal error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no task file, starting empty");
            return Ok(Database::default());
        }
        Self::read(path)
    }

    /// Save the store using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)?;
        debug!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    /// Write the current tasks to a separate backup file.
    pub fn backup(&self, backup_path: &Path) -> Result<()> {
        write_json_atomic(backup_path, self)?;
        info!(path = %backup_path.display(), count = self.tasks.len(), "backup written");
        Ok(())
    }

    /// Read the backup file. Fails with `NoBackup` when it does not exist and
    /// with the non-fatal `BadBackup` when it does not parse; either way the
    /// caller keeps its current store.
    pub fn restore(backup_path: &Path) -> Result<Self> {
        if !backup_path.exists() {
            return Err(TodoError::NoBackup(backup_path.to_path_buf()));
        }
        let db = Self::read(backup_path).map_err(|e| match e {
            TodoError::Parse { path, source } => TodoError::BadBackup { path, source },
            other => other,
        })?;
        info!(path = %backup_path.display(), count = db.tasks.len(), "backup read");
        Ok(db)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fail with `InvalidIndex` unless `index` addresses an existing task.
    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TodoError::invalid_index(index, self.tasks.len()))
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let buf = fs::read_to_string(path)?;
        serde_json::from_str(&buf).map_err(|source| TodoError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Pretty-print `value` with four-space indentation into `path` via a sibling
/// temp file.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    {
        let mut w = BufWriter::new(File::create(&tmp)?);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut w, formatter);
        value.serialize(&mut ser)?;
        w.flush()?;
        w.get_ref().sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Category, Priority, Status};
    use tempfile::TempDir;

    fn sample() -> Database {
        let mut done = Task::new("Ship it", "work", "2024-12-31", "high");
        done.status = Status::Completed;
        Database::new(vec![
            Task::new("Buy milk", "Personal", "2025-01-01", "High"),
            done,
            Task::new("Call \"Bob\", maybe", "errands", "someday", "low"),
        ])
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let db = Database::load(&dir.path().join("tasks.json")).unwrap();
        assert!(db.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let db = sample();
        db.save(&path).unwrap();

        let loaded = Database::load(&path).unwrap();
        assert_eq!(loaded, db);
        assert_eq!(loaded.tasks[2].category, Category::Custom("Errands".into()));
        assert_eq!(loaded.tasks[2].priority, Priority::Low);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_is_a_json_array_with_original_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        sample().save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["task"], "Buy milk");
        assert_eq!(first["due"], "2025-01-01");
        assert_eq!(value[1]["status"], "Completed");
        assert!(raw.contains("\n        \"task\""));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[{not json").unwrap();

        let err = Database::load(&path).unwrap_err();
        assert!(matches!(err, TodoError::Parse { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn restore_without_backup_reports_no_backup() {
        let dir = TempDir::new().unwrap();
        let err = Database::restore(&dir.path().join("tasks_backup.json")).unwrap_err();
        assert!(matches!(err, TodoError::NoBackup(_)));
    }

    #[test]
    fn malformed_backup_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let backup = dir.path().join("tasks_backup.json");
        fs::write(&backup, "[{oops").unwrap();

        let err = Database::restore(&backup).unwrap_err();
        assert!(matches!(err, TodoError::BadBackup { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn backup_is_independent_of_primary() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("tasks.json");
        let backup = dir.path().join("tasks_backup.json");
        let mut db = sample();
        db.save(&primary).unwrap();
        db.backup(&backup).unwrap();

        db.tasks.clear();
        db.save(&primary).unwrap();

        assert_eq!(Database::restore(&backup).unwrap(), sample());
        assert!(Database::load(&primary).unwrap().is_empty());
    }

    #[test]
    fn check_index_bounds() {
        let db = sample();
        assert!(db.check_index(2).is_ok());
        assert!(matches!(
            db.check_index(3),
            Err(TodoError::InvalidIndex { index: 3, len: 3 })
        ));
    }
}
