//! Plain-text task table shared by the menu and the CLI.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::task::Task;

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Enumerate all tasks with their positions, for passing to [`format_table`].
pub fn numbered(tasks: &[Task]) -> Vec<(usize, &Task)> {
    tasks.iter().enumerate().collect()
}

/// Render rows as a table numbered from 1. Returns "No tasks found." for an
/// empty view.
pub fn format_table(rows: &[(usize, &Task)], today: NaiveDate) -> String {
    if rows.is_empty() {
        return "No tasks found.".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<30} {:<10} {:<22} {:<8} {}",
        "ID", "Task", "Category", "Due Date", "Priority", "Status"
    );
    for (index, t) in rows {
        let due = match t.due_marker(today) {
            Some(marker) => format!("{} ({marker})", t.due),
            None => t.due.clone(),
        };
        let _ = writeln!(
            out,
            "{:<4} {:<30} {:<10} {:<22} {:<8} {}",
            index + 1,
            truncate(&t.name, 30),
            truncate(t.category.as_str(), 10),
            truncate(&due, 22),
            t.priority,
            t.status
        );
    }
    out.pop();
    out
}
