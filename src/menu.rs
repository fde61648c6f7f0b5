//! Interactive numbered menu.
//!
//! Reads one choice per line and runs the matching operation against the
//! session. Input and output are generic so the loop can be driven from a
//! script in tests. End of input is treated like choosing Exit.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::{Result, TodoError};
use crate::fields::SortKey;
use crate::ops::{self, TaskEdit};
use crate::session::Session;
use crate::theme::{Role, Theme};
use crate::undo::Undone;
use crate::view::{format_table, numbered};

const MENU_ITEMS: [&str; 16] = [
    "View Tasks",
    "Add Task",
    "Delete Task",
    "Complete Task",
    "Edit Task",
    "Export to CSV",
    "Search Tasks",
    "Filter by Category",
    "Show Statistics",
    "Sort Tasks",
    "Undo Last Action",
    "Backup Tasks",
    "Restore Tasks",
    "View History",
    "Toggle Theme (Dark/Light)",
    "Exit",
];

const QUOTES: [&str; 5] = [
    "Dream big. Start small. Act now.",
    "Discipline is the bridge between goals and accomplishment.",
    "Focus on being productive instead of busy.",
    "Don't watch the clock; do what it does. Keep going.",
    "Success is not final, failure is not fatal.",
];

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    View,
    Add,
    Delete,
    Complete,
    Edit,
    Export,
    Search,
    Filter,
    Stats,
    Sort,
    Undo,
    Backup,
    Restore,
    History,
    ToggleTheme,
    Exit,
}

impl Choice {
    /// Parse the number typed at the main prompt.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => Choice::View,
            "2" => Choice::Add,
            "3" => Choice::Delete,
            "4" => Choice::Complete,
            "5" => Choice::Edit,
            "6" => Choice::Export,
            "7" => Choice::Search,
            "8" => Choice::Filter,
            "9" => Choice::Stats,
            "10" => Choice::Sort,
            "11" => Choice::Undo,
            "12" => Choice::Backup,
            "13" => Choice::Restore,
            "14" => Choice::History,
            "15" => Choice::ToggleTheme,
            "16" => Choice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Menu loop state.
pub struct Menu<R, W> {
    session: Session,
    input: R,
    out: W,
    theme: Theme,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(session: Session, input: R, out: W, theme: Theme) -> Self {
        Menu { session, input, out, theme }
    }

    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.out)
    }

    /// Run until Exit or end of input. Only fatal errors are returned; all
    /// others are reported and the menu is shown again.
    pub fn run(&mut self) -> Result<()> {
        if let Some(quote) = QUOTES.choose(&mut rand::thread_rng()) {
            self.say(Role::Info, quote)?;
        }
        loop {
            self.print_menu()?;
            let line = match self.prompt("Choose an option: ") {
                Ok(line) => line,
                Err(e) if is_eof(&e) => return Ok(()),
                Err(e) => return Err(e),
            };
            let Some(choice) = Choice::parse(&line) else {
                self.say(Role::Error, "Invalid choice. Try again.")?;
                continue;
            };
            debug!(?choice, "menu choice");
            if choice == Choice::Exit {
                self.say(Role::Warning, "Goodbye! Stay productive.")?;
                return Ok(());
            }
            match self.dispatch(choice) {
                Ok(()) => {}
                Err(e) if is_eof(&e) => return Ok(()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn dispatch(&mut self, choice: Choice) -> Result<()> {
        match choice {
            Choice::View => self.show_all(),
            Choice::Add => self.add(),
            Choice::Delete => self.delete(),
            Choice::Complete => self.complete(),
            Choice::Edit => self.edit(),
            Choice::Export => {
                let count = self.session.export(None)?;
                let msg = format!("Exported {count} task(s) to {}", self.session.paths.export.display());
                self.say(Role::Success, msg)
            }
            Choice::Search => {
                let keyword = self.prompt("Enter keyword to search: ")?;
                let table = format_table(&ops::search(&self.session.db, &keyword), today());
                self.say(Role::Primary, table)
            }
            Choice::Filter => {
                let category = self.prompt("Enter category to filter (Work/Personal/Other): ")?;
                let table = format_table(&ops::filter_by_category(&self.session.db, &category), today());
                self.say(Role::Primary, table)
            }
            Choice::Stats => {
                let stats = ops::stats(&self.session.db, today());
                self.say(Role::Info, stats)
            }
            Choice::Sort => self.sort(),
            Choice::Undo => {
                let msg = match self.session.undo()? {
                    Undone::Restored { .. } => "Undo successful: Task restored.",
                    Undone::Reopened { .. } => "Undo successful: Task marked as not completed.",
                };
                self.say(Role::Success, msg)
            }
            Choice::Backup => {
                self.session.backup()?;
                let msg = format!("Backup saved to {}", self.session.paths.backup.display());
                self.say(Role::Success, msg)
            }
            Choice::Restore => {
                self.session.restore()?;
                self.say(Role::Success, "Tasks restored from backup.")
            }
            Choice::History => {
                let text = self.session.read_history()?;
                self.say(Role::Primary, text.trim_end())
            }
            Choice::ToggleTheme => {
                self.theme.toggle();
                let msg = format!("Theme switched to {} mode.", self.theme.kind);
                self.say(Role::Info, msg)
            }
            Choice::Exit => Ok(()),
        }
    }

    fn add(&mut self) -> Result<()> {
        let name = self.prompt("Enter task: ")?;
        let category = self.prompt("Category (Work/Personal/Other): ")?;
        let due = self.prompt("Due date (YYYY-MM-DD): ")?;
        let priority = self.prompt("Priority (High/Medium/Low): ")?;
        self.session.add(&name, &category, &due, &priority)?;
        self.say(Role::Success, "Task added successfully!")
    }

    fn delete(&mut self) -> Result<()> {
        let index = self.pick("Enter task number to delete: ")?;
        self.session.delete(index)?;
        self.say(Role::Error, "Task deleted.")
    }

    fn complete(&mut self) -> Result<()> {
        let index = self.pick("Enter task number to complete: ")?;
        self.session.complete(index)?;
        self.say(Role::Success, "Task marked as completed!")
    }

    fn edit(&mut self) -> Result<()> {
        let index = self.pick("Enter task number to edit: ")?;
        let current = self.session.db.tasks[index].clone();
        self.say(Role::Info, "Leave blank to keep current value.")?;
        let edit = TaskEdit {
            name: self.prompt(&format!("Task name [{}]: ", current.name))?,
            category: self.prompt(&format!("Category [{}]: ", current.category))?,
            due: self.prompt(&format!("Due date [{}]: ", current.due))?,
            priority: self.prompt(&format!("Priority [{}]: ", current.priority))?,
            status: self.prompt(&format!("Status [{}]: ", current.status))?,
        };
        self.session.edit(index, &edit)?;
        self.say(Role::Success, "Task updated!")
    }

    fn sort(&mut self) -> Result<()> {
        self.say(Role::Primary, "Sort by: 1. Due Date  2. Priority  3. Status")?;
        let opt = self.prompt("Choose option: ")?;
        let Some(key) = SortKey::from_menu_choice(&opt) else {
            return self.say(Role::Error, "Invalid sort option.");
        };
        self.session.sort(key)?;
        self.say(Role::Success, "Tasks sorted!")?;
        self.show_all()
    }

    fn show_all(&mut self) -> Result<()> {
        let table = format_table(&numbered(&self.session.db.tasks), today());
        let role = if self.session.db.is_empty() { Role::Warning } else { Role::Primary };
        self.say(role, table)
    }

    /// Show the list, then read a 1-based task number.
    fn pick(&mut self, label: &str) -> Result<usize> {
        self.show_all()?;
        let input = self.prompt(label)?;
        self.session.parse_task_number(&input)
    }

    fn print_menu(&mut self) -> Result<()> {
        let mut text = String::from("\n--- To-Do List Menu ---");
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            text.push_str(&format!("\n{}. {item}", i + 1));
        }
        self.say(Role::Primary, text)
    }

    fn report(&mut self, err: &TodoError) -> Result<()> {
        let role = match err {
            TodoError::NothingToUndo | TodoError::NoHistory(_) => Role::Warning,
            _ => Role::Error,
        };
        self.say(role, err)
    }

    fn say(&mut self, role: Role, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.out, "{}", self.theme.paint(role, text))?;
        Ok(())
    }

    /// Print `label` and read one line without its line ending. End of input
    /// is an `UnexpectedEof` I/O error.
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn is_eof(err: &TodoError) -> bool {
    matches!(err, TodoError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
