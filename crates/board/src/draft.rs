//! Create form state

use chrono::{NaiveDate, Utc};
use todo_core::Priority;

/// Unsubmitted input of the create form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            priority: Priority::Low,
            due_date: Utc::now().date_naive(),
        }
    }
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    /// Clear the title after a successful submit; priority and date stay
    pub fn clear_title(&mut self) {
        self.title.clear();
    }
}
