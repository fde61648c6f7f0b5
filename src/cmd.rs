//! Subcommands and their handlers.
//!
//! Handlers print to stdout and return errors to `main`, which decides how to
//! report them. Task numbers are 1-based, as in the list view.

use std::io;
use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::error::Result;
use crate::fields::SortKey;
use crate::menu::Menu;
use crate::ops::{self, TaskEdit};
use crate::session::Session;
use crate::theme::Theme;
use crate::view::{format_table, numbered};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive numbered menu.
    Menu,

    /// Show all tasks.
    List,

    /// Add a new pending task.
    Add {
        /// Task name.
        name: String,
        /// Work, Personal, Other or any custom category.
        #[arg(long, default_value = "Other")]
        category: String,
        /// Due date, YYYY-MM-DD. Not validated.
        #[arg(long)]
        due: Option<String>,
        /// High, Medium or Low. Anything else becomes Medium.
        #[arg(long, default_value = "Medium")]
        priority: String,
    },

    /// Delete a task by number.
    Delete {
        /// Task number as shown by `list`.
        number: String,
    },

    /// Mark a task completed.
    Complete {
        /// Task number as shown by `list`.
        number: String,
    },

    /// Replace fields on a task. Omitted fields are kept.
    Edit {
        /// Task number as shown by `list`.
        number: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Pending, In-Progress or Completed.
        #[arg(long)]
        status: Option<String>,
    },

    /// Find tasks whose name contains a keyword.
    Search {
        keyword: String,
    },

    /// Show tasks in one category.
    Filter {
        category: String,
    },

    /// Show task counts.
    Stats,

    /// Reorder the stored list.
    Sort {
        #[arg(value_enum)]
        key: SortKey,
    },

    /// Export all tasks to CSV.
    Export {
        /// Output file path (default: tasks_export.csv in the data directory).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Save a copy of the task list to tasks_backup.json.
    Backup,

    /// Replace the task list with the backup copy.
    Restore,

    /// Print the action history.
    History,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the interactive menu on stdin/stdout.
pub fn cmd_menu(session: Session, theme: Theme) -> Result<()> {
    let stdin = io::stdin();
    let mut menu = Menu::new(session, stdin.lock(), io::stdout(), theme);
    menu.run()
}

pub fn cmd_list(session: &Session) {
    println!("{}", format_table(&numbered(&session.db.tasks), Local::now().date_naive()));
}

pub fn cmd_add(session: &mut Session, name: String, category: String, due: Option<String>, priority: String) -> Result<()> {
    let index = session.add(&name, &category, due.as_deref().unwrap_or_default(), &priority)?;
    println!("Added task {}", index + 1);
    Ok(())
}

pub fn cmd_delete(session: &mut Session, number: String) -> Result<()> {
    let index = session.parse_task_number(&number)?;
    let removed = session.delete(index)?;
    println!("Deleted task {}: {}", index + 1, removed.name);
    Ok(())
}

pub fn cmd_complete(session: &mut Session, number: String) -> Result<()> {
    let index = session.parse_task_number(&number)?;
    let task = session.complete(index)?;
    println!("Marked done: {}", task.name);
    Ok(())
}

pub fn cmd_edit(
    session: &mut Session,
    number: String,
    name: Option<String>,
    category: Option<String>,
    due: Option<String>,
    priority: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let index = session.parse_task_number(&number)?;
    let edit = TaskEdit {
        name: name.unwrap_or_default(),
        category: category.unwrap_or_default(),
        due: due.unwrap_or_default(),
        priority: priority.unwrap_or_default(),
        status: status.unwrap_or_default(),
    };
    session.edit(index, &edit)?;
    println!("Updated task {}", index + 1);
    Ok(())
}

pub fn cmd_search(session: &Session, keyword: String) {
    let rows = ops::search(&session.db, &keyword);
    println!("{}", format_table(&rows, Local::now().date_naive()));
}

pub fn cmd_filter(session: &Session, category: String) {
    let rows = ops::filter_by_category(&session.db, &category);
    println!("{}", format_table(&rows, Local::now().date_naive()));
}

pub fn cmd_stats(session: &Session) {
    println!("{}", ops::stats(&session.db, Local::now().date_naive()));
}

pub fn cmd_sort(session: &mut Session, key: SortKey) -> Result<()> {
    session.sort(key)?;
    println!("Tasks sorted!");
    cmd_list(session);
    Ok(())
}

/// Export tasks to CSV for use in spreadsheets.
pub fn cmd_export(session: &Session, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| session.paths.export.clone());
    let count = session.export(Some(path.as_path()))?;
    println!("Exported {} task(s) to {}", count, path.display());
    Ok(())
}

pub fn cmd_backup(session: &Session) -> Result<()> {
    session.backup()?;
    println!("Backup saved to {}", session.paths.backup.display());
    Ok(())
}

pub fn cmd_restore(session: &mut Session) -> Result<()> {
    let count = session.restore()?;
    println!("Tasks restored from backup ({count} task(s)).");
    Ok(())
}

pub fn cmd_history(session: &Session) -> Result<()> {
    print!("{}", session.read_history()?);
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Paths;
    use crate::error::TodoError;
    use crate::fields::{Category, Status};
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::open(Paths::in_dir(dir.path())).unwrap()
    }

    #[test]
    fn add_complete_and_delete_by_number() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        cmd_add(&mut s, "One".into(), "work".into(), None, "High".into()).unwrap();
        cmd_add(&mut s, "Two".into(), "Other".into(), Some("2025-01-01".into()), "Low".into()).unwrap();

        cmd_complete(&mut s, "2".into()).unwrap();
        assert_eq!(s.db.tasks[1].status, Status::Completed);

        cmd_delete(&mut s, "1".into()).unwrap();
        assert_eq!(s.db.len(), 1);
        assert_eq!(s.db.tasks[0].name, "Two");
        assert_eq!(session(&dir).db, s.db);
    }

    #[test]
    fn edit_keeps_omitted_fields() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        cmd_add(&mut s, "One".into(), "Work".into(), Some("2025-01-01".into()), "High".into()).unwrap();
        cmd_edit(&mut s, "1".into(), None, Some("personal".into()), None, None, Some("in-progress".into())).unwrap();

        let t = &s.db.tasks[0];
        assert_eq!(t.name, "One");
        assert_eq!(t.category, Category::Personal);
        assert_eq!(t.due, "2025-01-01");
        assert_eq!(t.status, Status::InProgress);
    }

    #[test]
    fn bad_numbers_are_errors() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(matches!(cmd_delete(&mut s, "1".into()), Err(TodoError::InvalidIndex { .. })));
        assert!(matches!(cmd_complete(&mut s, "-1".into()), Err(TodoError::InvalidNumber(_))));
    }

    #[test]
    fn export_to_custom_path() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        cmd_add(&mut s, "One".into(), "Work".into(), None, "High".into()).unwrap();
        let out = dir.path().join("out.csv");
        cmd_export(&s, Some(out.clone())).unwrap();
        assert!(out.exists());
        assert!(!s.paths.export.exists());
    }

    #[test]
    fn restore_and_history_report_missing_files() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let err = cmd_restore(&mut s).unwrap_err();
        assert!(err.is_informational());
        assert!(cmd_history(&s).unwrap_err().is_informational());
    }
}
