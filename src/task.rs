//! Task record and due-date helpers.
//!
//! A task has no identifier of its own; callers address it by its position in
//! the store, which shifts after deletes and sorts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// Date format used for the `due` field.
pub const DUE_FORMAT: &str = "%Y-%m-%d";

/// One to-do item. Field names on disk follow the existing `tasks.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task")]
    pub name: String,
    pub category: Category,
    /// Kept as text; only parsed when checking for overdue tasks.
    pub due: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
}

impl Task {
    /// Build a new pending task from raw user input.
    pub fn new(name: &str, category: &str, due: &str, priority: &str) -> Self {
        Task {
            name: name.to_string(),
            category: Category::from_input(category),
            due: due.to_string(),
            priority: Priority::from_input(priority),
            status: Status::Pending,
        }
    }

    /// The due date, if the stored text is a valid `YYYY-MM-DD` date.
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.due, DUE_FORMAT).ok()
    }

    /// Not completed and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != Status::Completed && self.due_date().is_some_and(|d| d < today)
    }

    /// Marker shown next to the due date in task listings.
    pub fn due_marker(&self, today: NaiveDate) -> Option<&'static str> {
        if self.status == Status::Completed {
            return None;
        }
        match self.due_date() {
            Some(d) if d < today => Some("Overdue"),
            Some(d) if d == today => Some("Today"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DUE_FORMAT).unwrap()
    }

    #[test]
    fn new_task_applies_defaults() {
        let t = Task::new("Write report", "work", "2099-01-01", "whenever");
        assert_eq!(t.category, Category::Work);
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.status, Status::Pending);
    }

    #[test]
    fn reads_original_json_layout() {
        let json = r#"{"task":"Buy milk","category":"Personal","due":"2025-01-01","priority":"High","status":"Pending"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.name, "Buy milk");
        assert_eq!(t.priority, Priority::High);
        assert_eq!(serde_json::to_string(&t).unwrap(), json);
    }

    #[test]
    fn missing_priority_and_status_get_defaults() {
        let json = r#"{"task":"Old","category":"Other","due":"soon"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.status, Status::Pending);
    }

    #[test]
    fn overdue_ignores_completed_and_unparseable_dates() {
        let today = day("2025-06-01");
        let mut t = Task::new("a", "Work", "2025-05-31", "");
        assert!(t.is_overdue(today));
        assert_eq!(t.due_marker(today), Some("Overdue"));

        t.status = Status::Completed;
        assert!(!t.is_overdue(today));
        assert_eq!(t.due_marker(today), None);

        let t = Task::new("b", "Work", "next week", "");
        assert!(!t.is_overdue(today));

        let t = Task::new("c", "Work", "2025-06-01", "");
        assert!(!t.is_overdue(today));
        assert_eq!(t.due_marker(today), Some("Today"));
    }
}
