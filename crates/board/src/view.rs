//! Display rows

use serde::Serialize;
use todo_core::todo::DATE_FORMAT;
use todo_core::{Priority, Todo, TodoId};

/// One todo as the list shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRow {
    pub id: TodoId,
    pub badge: &'static str,
    pub title: String,
    pub due_date: Option<String>,
    pub completed: bool,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            // Records without a priority display as low
            badge: todo.priority.as_ref().map_or(Priority::Low.badge(), Priority::badge),
            title: todo.title.clone(),
            due_date: todo.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
            completed: todo.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_row_from_todo() {
        let mut todo = Todo::new("-a1", "Buy milk");
        todo.priority = Some(Priority::High);
        todo.due_date = NaiveDate::from_ymd_opt(2024, 6, 1);

        let row = TodoRow::from(&todo);
        assert_eq!(row.badge, "H");
        assert_eq!(row.due_date.as_deref(), Some("2024-06-01"));
        assert!(!row.completed);
    }

    #[test]
    fn test_missing_priority_shows_low_badge() {
        let mut todo = Todo::new("-a2", "Loose end");
        todo.priority = None;
        assert_eq!(TodoRow::from(&todo).badge, "L");
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = TodoRow::from(&Todo::new("-a3", "Stretch"));
        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("dueDate").is_some());
    }
}
