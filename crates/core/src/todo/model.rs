//! Todo model definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::priority::Priority;

/// Store-assigned todo identifier
pub type TodoId = String;

/// Wire format of the due date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A todo document as stored remotely
///
/// The identifier is not part of the body: the store assigns it on create
/// and it is derived from the document path on read.
///
/// `extra` holds the document fields this client does not interpret, so a
/// full replacement writes them back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "date", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoRecord {
    /// Create a new, not yet completed record
    pub fn new(title: impl Into<String>, priority: Priority, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            priority: Some(priority),
            due_date: Some(due_date),
            completed: false,
            extra: Map::new(),
        }
    }
}

/// A todo in the in-memory collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    /// Uninterpreted document fields, kept for replacement writes
    pub extra: Map<String, Value>,
}

impl Todo {
    /// Create a low priority todo with no due date
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: Some(Priority::default()),
            due_date: None,
            completed: false,
            extra: Map::new(),
        }
    }

    /// Full replacement body for this todo, uninterpreted fields included
    pub fn to_record(&self) -> TodoRecord {
        TodoRecord {
            title: self.title.clone(),
            priority: self.priority.clone(),
            due_date: self.due_date,
            completed: self.completed,
            extra: self.extra.clone(),
        }
    }

    /// Normalize a raw store document.
    ///
    /// `title` and `completed` always normalize: a missing or non-string
    /// title becomes text, a non-boolean `completed` becomes `false`. A
    /// `priority` that is not a string or a `date` that is not `YYYY-MM-DD`
    /// is left uninterpreted and stays in `extra` with every unknown field.
    /// Returns `None` when the document is not a JSON object.
    pub fn from_document(id: &str, document: &Value) -> Option<Self> {
        let Some(fields) = document.as_object() else {
            warn!("Skipping todo {}: document is not an object", id);
            return None;
        };
        let mut extra = fields.clone();

        let title = match extra.remove("title") {
            Some(Value::String(title)) => title,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let completed = extra
            .remove("completed")
            .and_then(|value| value.as_bool())
            .unwrap_or(false);

        let priority = match extra.get("priority") {
            Some(Value::String(raw)) => Some(Priority::from(raw.as_str())),
            _ => None,
        };
        if priority.is_some() {
            extra.remove("priority");
        }

        let due_date = extra.get("date").and_then(Value::as_str).and_then(|raw| {
            match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    debug!("Keeping unparseable date '{}' on todo {}: {}", raw, id, e);
                    None
                }
            }
        });
        if due_date.is_some() {
            extra.remove("date");
        }

        Some(Self {
            id: id.to_string(),
            title,
            priority,
            due_date,
            completed,
            extra,
        })
    }
}
