//! Single-step undo for delete and complete.
//!
//! Only the most recent reversible action is kept. Undo addresses tasks by the
//! index they had when the action ran, so a sort or another delete in between
//! can put a restored task at a different spot than it came from.

use crate::db::Database;
use crate::error::{Result, TodoError};
use crate::fields::Status;
use crate::task::Task;

/// The buffered prior action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UndoSlot {
    #[default]
    Empty,
    Delete { task: Task, index: usize },
    Complete { prior: Status, index: usize },
}

/// What an undo changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undone {
    /// A deleted task was put back at `index`.
    Restored { name: String, index: usize },
    /// A completed task got its previous status back.
    Reopened { name: String, status: Status },
}

impl UndoSlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, UndoSlot::Empty)
    }

    pub fn record_delete(&mut self, task: Task, index: usize) {
        *self = UndoSlot::Delete { task, index };
    }

    pub fn record_complete(&mut self, prior: Status, index: usize) {
        *self = UndoSlot::Complete { prior, index };
    }

    /// Reverse the buffered action against `db`. The slot is empty afterwards
    /// whether or not anything was undone. Does not persist.
    pub fn apply(&mut self, db: &mut Database) -> Result<Undone> {
        match std::mem::take(self) {
            UndoSlot::Empty => Err(TodoError::NothingToUndo),
            UndoSlot::Delete { task, index } => {
                // Clamp so a shrunken list appends instead of panicking.
                let index = index.min(db.tasks.len());
                let name = task.name.clone();
                db.tasks.insert(index, task);
                Ok(Undone::Restored { name, index })
            }
            UndoSlot::Complete { prior, index } => {
                let len = db.tasks.len();
                let task = db
                    .tasks
                    .get_mut(index)
                    .ok_or_else(|| TodoError::invalid_index(index, len))?;
                task.status = prior;
                Ok(Undone::Reopened { name: task.name.clone(), status: prior })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_of(names: &[&str]) -> Database {
        Database::new(names.iter().map(|n| Task::new(n, "Work", "2025-01-01", "")).collect())
    }

    #[test]
    fn empty_slot_reports_nothing_to_undo() {
        let mut slot = UndoSlot::default();
        let mut db = db_of(&["a"]);
        let before = db.clone();
        assert!(matches!(slot.apply(&mut db), Err(TodoError::NothingToUndo)));
        assert_eq!(db, before);
    }

    #[test]
    fn undo_delete_reinserts_at_original_index() {
        let mut db = db_of(&["a", "b", "c"]);
        let removed = db.tasks.remove(1);
        let mut slot = UndoSlot::default();
        slot.record_delete(removed, 1);

        let undone = slot.apply(&mut db).unwrap();
        assert_eq!(undone, Undone::Restored { name: "b".into(), index: 1 });
        assert_eq!(db, db_of(&["a", "b", "c"]));
        assert!(slot.is_empty());
    }

    #[test]
    fn undo_delete_appends_when_list_shrank() {
        let mut db = db_of(&["a", "b", "c"]);
        let removed = db.tasks.remove(2);
        let mut slot = UndoSlot::default();
        slot.record_delete(removed, 2);
        db.tasks.clear();

        slot.apply(&mut db).unwrap();
        assert_eq!(db, db_of(&["c"]));
    }

    #[test]
    fn undo_complete_restores_prior_status() {
        let mut db = db_of(&["a"]);
        db.tasks[0].status = Status::InProgress;
        let mut slot = UndoSlot::default();
        slot.record_complete(Status::InProgress, 0);
        db.tasks[0].status = Status::Completed;

        let undone = slot.apply(&mut db).unwrap();
        assert_eq!(undone, Undone::Reopened { name: "a".into(), status: Status::InProgress });
        assert_eq!(db.tasks[0].status, Status::InProgress);
    }

    #[test]
    fn slot_clears_even_when_undo_fails() {
        let mut db = db_of(&[]);
        let mut slot = UndoSlot::default();
        slot.record_complete(Status::Pending, 4);
        assert!(slot.apply(&mut db).is_err());
        assert!(slot.is_empty());
    }

    #[test]
    fn newer_action_overwrites_slot() {
        let mut slot = UndoSlot::default();
        slot.record_delete(Task::new("a", "", "", ""), 0);
        slot.record_complete(Status::Pending, 3);
        assert_eq!(slot, UndoSlot::Complete { prior: Status::Pending, index: 3 });
    }
}
