//! Command operations over a [`Session`].
//!
//! Indices are 0-based here; front ends translate from the 1-based numbers
//! they show. Every mutating operation either writes its whole change to disk
//! or leaves the store exactly as it was.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{Result, TodoError};
use crate::fields::*;
use crate::history::Action;
use crate::session::Session;
use crate::task::Task;
use crate::undo::Undone;

/// Column header of CSV exports.
pub const CSV_HEADER: [&str; 5] = ["Task", "Category", "Due Date", "Priority", "Status"];

/// Replacement values for an edit. Empty strings keep the current value.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub name: String,
    pub category: String,
    pub due: String,
    pub priority: String,
    pub status: String,
}

/// Task counts by status, plus overdue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Completed: {} | Pending: {} | In-Progress: {} | Overdue: {}",
            self.total, self.completed, self.pending, self.in_progress, self.overdue
        )
    }
}

/// Compute counts for the current store.
pub fn stats(db: &Database, today: NaiveDate) -> Stats {
    let mut s = Stats { total: db.len(), ..Stats::default() };
    for t in &db.tasks {
        match t.status {
            Status::Completed => s.completed += 1,
            Status::Pending => s.pending += 1,
            Status::InProgress => s.in_progress += 1,
        }
        if t.is_overdue(today) {
            s.overdue += 1;
        }
    }
    s
}

/// Tasks whose name contains `keyword`, ignoring case, with their positions.
pub fn search<'a>(db: &'a Database, keyword: &str) -> Vec<(usize, &'a Task)> {
    let needle = keyword.to_lowercase();
    db.tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.name.to_lowercase().contains(&needle))
        .collect()
}

/// Tasks whose category matches `category` once both are capitalised, with
/// their positions. Stored values are compared as written, not rewritten.
pub fn filter_by_category<'a>(db: &'a Database, category: &str) -> Vec<(usize, &'a Task)> {
    let wanted = capitalize(category.trim());
    db.tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| capitalize(t.category.as_str()) == wanted)
        .collect()
}

/// Write `tasks` to `path` as CSV, one row per task in the given order.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(CSV_HEADER)?;
    for t in tasks {
        wtr.write_record([
            t.name.as_str(),
            t.category.as_str(),
            t.due.as_str(),
            t.priority.as_str(),
            t.status.as_str(),
        ])?;
    }
    wtr.flush()?;
    info!(path = %path.display(), count = tasks.len(), "exported csv");
    Ok(tasks.len())
}

impl Session {
    /// Apply `f` to the store and persist. On any failure the in-memory store
    /// is put back to its prior state.
    fn commit<R>(&mut self, f: impl FnOnce(&mut Database) -> Result<R>) -> Result<R> {
        let before = self.db.clone();
        let out = f(&mut self.db).and_then(|out| self.save().map(|()| out));
        if out.is_err() {
            self.db = before;
        }
        out
    }

    fn log(&self, action: Action, name: &str) {
        if let Err(e) = self.history.append(action, name) {
            warn!(error = %e, "failed to append history");
        }
    }

    /// Append a new pending task. Returns its index.
    pub fn add(&mut self, name: &str, category: &str, due: &str, priority: &str) -> Result<usize> {
        let task = Task::new(name, category, due, priority);
        let index = self.commit(|db| {
            db.tasks.push(task);
            Ok(db.len() - 1)
        })?;
        info!(index, name, "task added");
        Ok(index)
    }

    /// Remove the task at `index` and remember it for undo.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.db.check_index(index)?;
        let removed = self.commit(|db| Ok(db.tasks.remove(index)))?;
        self.log(Action::Deleted, &removed.name);
        self.undo.record_delete(removed.clone(), index);
        info!(index, name = %removed.name, "task deleted");
        Ok(removed)
    }

    /// Mark the task at `index` completed and remember its prior status.
    pub fn complete(&mut self, index: usize) -> Result<&Task> {
        self.db.check_index(index)?;
        let prior = self.commit(|db| {
            let t = &mut db.tasks[index];
            Ok(std::mem::replace(&mut t.status, Status::Completed))
        })?;
        let name = self.db.tasks[index].name.clone();
        self.log(Action::Completed, &name);
        self.undo.record_complete(prior, index);
        info!(index, name = %name, "task completed");
        Ok(&self.db.tasks[index])
    }

    /// Replace each field of the task at `index` that has a non-empty value in
    /// `edit`. Not undoable.
    pub fn edit(&mut self, index: usize, edit: &TaskEdit) -> Result<&Task> {
        self.db.check_index(index)?;
        self.commit(|db| {
            let t = &mut db.tasks[index];
            if !edit.name.is_empty() {
                t.name = edit.name.clone();
            }
            if !edit.category.is_empty() {
                t.category = Category::from_input(&edit.category);
            }
            if !edit.due.is_empty() {
                t.due = edit.due.clone();
            }
            if !edit.priority.is_empty() {
                t.priority = Priority::from_input(&edit.priority);
            }
            if !edit.status.is_empty() {
                t.status = Status::from_input(&edit.status);
            }
            Ok(())
        })?;
        info!(index, "task edited");
        Ok(&self.db.tasks[index])
    }

    /// Stable sort of the stored order.
    pub fn sort(&mut self, key: SortKey) -> Result<()> {
        self.commit(|db| {
            match key {
                SortKey::Due => db.tasks.sort_by(|a, b| a.due.cmp(&b.due)),
                SortKey::Priority => db.tasks.sort_by_key(|t| t.priority.rank()),
                SortKey::Status => db.tasks.sort_by_key(|t| t.status.rank()),
            }
            Ok(())
        })?;
        info!(?key, "tasks sorted");
        Ok(())
    }

    /// Reverse the last delete or complete. The undo slot is empty afterwards.
    pub fn undo(&mut self) -> Result<Undone> {
        let mut slot = std::mem::take(&mut self.undo);
        let undone = self.commit(|db| slot.apply(db))?;
        info!(?undone, "undo applied");
        Ok(undone)
    }

    /// Copy the current tasks to the backup file.
    pub fn backup(&self) -> Result<()> {
        self.db.backup(&self.paths.backup)
    }

    /// Replace the store with the backup contents and persist them. Without a
    /// backup file the store is left untouched. History is not restored.
    pub fn restore(&mut self) -> Result<usize> {
        let restored = Database::restore(&self.paths.backup)?;
        self.commit(|db| {
            *db = restored;
            Ok(db.len())
        })
    }

    /// Export the full store to the configured CSV path or `path`.
    pub fn export(&self, path: Option<&Path>) -> Result<usize> {
        export_csv(&self.db.tasks, path.unwrap_or(self.paths.export.as_path()))
    }

    /// Raw history text.
    pub fn read_history(&self) -> Result<String> {
        self.history.read()
    }

    /// Translate a 1-based task number typed by a user into an index.
    pub fn parse_task_number(&self, input: &str) -> Result<usize> {
        let number: usize = input
            .trim()
            .parse()
            .map_err(|_| TodoError::InvalidNumber(input.trim().to_string()))?;
        let index = number
            .checked_sub(1)
            .ok_or_else(|| TodoError::InvalidNumber(input.trim().to_string()))?;
        self.db.check_index(index)?;
        Ok(index)
    }
}
