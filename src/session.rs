//! Session context passed to every operation.

use tracing::info;

use crate::config::Paths;
use crate::db::Database;
use crate::error::Result;
use crate::history::HistoryLog;
use crate::undo::UndoSlot;

/// Owns the task store, the undo slot and the history handle for one run.
#[derive(Debug)]
pub struct Session {
    pub db: Database,
    pub undo: UndoSlot,
    pub history: HistoryLog,
    pub paths: Paths,
}

impl Session {
    /// Load the task store for `paths`. A malformed task file aborts here.
    pub fn open(paths: Paths) -> Result<Self> {
        let db = Database::load(&paths.tasks)?;
        info!(path = %paths.tasks.display(), count = db.len(), "session opened");
        Ok(Session {
            db,
            undo: UndoSlot::default(),
            history: HistoryLog::new(&paths.history),
            paths,
        })
    }

    /// Persist the full store to the primary file.
    pub fn save(&self) -> Result<()> {
        self.db.save(&self.paths.tasks)
    }
}
