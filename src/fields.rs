//! Enumerations and field types for task records.
//!
//! Every field that users type in free-form is modelled as a closed set of
//! variants. Unrecognised input never fails: it maps to the documented default
//! (Medium priority, Pending status, and a custom capitalised category).

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Upper-case the first character and lower-case the rest ("wORK" -> "Work").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Grouping for a task. The three well-known categories get their own variant;
/// anything else a user types is kept as a custom category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Personal,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    /// Case-normalise user input. Blank input becomes `Other`.
    pub fn from_input(s: &str) -> Self {
        let normalised = capitalize(s.trim());
        match normalised.as_str() {
            "" | "Other" => Category::Other,
            "Work" => Category::Work,
            "Personal" => Category::Personal,
            _ => Category::Custom(normalised),
        }
    }

    /// Map a stored value back to its variant without normalising it, so
    /// records written by hand or by older versions survive a save unchanged.
    pub fn from_stored(s: String) -> Self {
        match s.as_str() {
            "Work" => Category::Work,
            "Personal" => Category::Personal,
            "Other" => Category::Other,
            _ => Category::Custom(s),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Other => "Other",
            Category::Custom(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from_stored(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Task importance. Sorting ranks High first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse user input case-insensitively, falling back to `Medium`.
    pub fn from_input(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    /// Sort rank: High=0, Medium=1, Low=2.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::from_input(&s)
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Task progress. Sorting ranks Pending first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl Status {
    /// Parse user input, ignoring case and separators ("in progress",
    /// "In-Progress", "in_progress"). Falls back to `Pending`.
    pub fn from_input(s: &str) -> Self {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(*c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "inprogress" => Status::InProgress,
            "completed" => Status::Completed,
            _ => Status::Pending,
        }
    }

    /// Sort rank: Pending=0, In-Progress=1, Completed=2.
    pub fn rank(self) -> u8 {
        match self {
            Status::Pending => 0,
            Status::InProgress => 1,
            Status::Completed => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In-Progress",
            Status::Completed => "Completed",
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::from_input(&s)
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Available sorting options for the stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Due date, compared as text.
    Due,
    Priority,
    Status,
}

impl SortKey {
    /// Map the interactive menu's sub-choice ("1", "2", "3").
    pub fn from_menu_choice(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(SortKey::Due),
            "2" => Some(SortKey::Priority),
            "3" => Some(SortKey::Status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("wORK"), "Work");
        assert_eq!(capitalize("personal"), "Personal");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("é"), "É");
    }

    #[test]
    fn category_normalises_case_and_keeps_custom_values() {
        assert_eq!(Category::from_input("work"), Category::Work);
        assert_eq!(Category::from_input(" PERSONAL "), Category::Personal);
        assert_eq!(Category::from_input(""), Category::Other);
        assert_eq!(Category::from_input("errands"), Category::Custom("Errands".into()));
    }

    #[test]
    fn stored_categories_are_kept_verbatim() {
        for raw in ["Home Office", "", "work"] {
            let c: Category = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(c, Category::Custom(raw.into()));
            assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{raw}\""));
        }
    }

    #[test]
    fn priority_falls_back_to_medium() {
        assert_eq!(Priority::from_input("HIGH"), Priority::High);
        assert_eq!(Priority::from_input("low"), Priority::Low);
        assert_eq!(Priority::from_input("urgent"), Priority::Medium);
        assert_eq!(Priority::from_input(""), Priority::Medium);
    }

    #[test]
    fn status_accepts_separator_variants() {
        assert_eq!(Status::from_input("In-Progress"), Status::InProgress);
        assert_eq!(Status::from_input("in progress"), Status::InProgress);
        assert_eq!(Status::from_input("completed"), Status::Completed);
        assert_eq!(Status::from_input("done"), Status::Pending);
    }

    #[test]
    fn enums_serialise_as_display_names() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"In-Progress\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        let c: Category = serde_json::from_str("\"Work\"").unwrap();
        assert_eq!(c, Category::Work);
        let p: Priority = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(p, Priority::Medium);
    }

    #[test]
    fn sort_key_menu_choices() {
        assert_eq!(SortKey::from_menu_choice("1"), Some(SortKey::Due));
        assert_eq!(SortKey::from_menu_choice(" 3 "), Some(SortKey::Status));
        assert_eq!(SortKey::from_menu_choice("4"), None);
    }
}
