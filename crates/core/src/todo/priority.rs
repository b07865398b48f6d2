//! Priority levels and the ordering policy

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::Todo;

/// Rank given to missing or unrecognized priority values
pub const UNRANKED: u8 = 3;

/// Todo priority level
///
/// The remote store is weakly typed, so any value other than the three
/// known levels is kept verbatim in `Unrecognized` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
    Unrecognized(String),
}

impl Priority {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Sort rank: high 0, medium 1, low 2, anything else 3
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
            Self::Unrecognized(_) => UNRANKED,
        }
    }

    /// Single letter badge; unrecognized values display as low
    pub fn badge(&self) -> &'static str {
        match self {
            Self::High => "H",
            Self::Medium => "M",
            Self::Low | Self::Unrecognized(_) => "L",
        }
    }
}

impl From<&str> for Priority {
    fn from(raw: &str) -> Self {
        match raw {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "high" | "medium" | "low" => Self::from(raw.as_str()),
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of an optional priority; absent values rank last
pub fn rank(priority: Option<&Priority>) -> u8 {
    priority.map_or(UNRANKED, Priority::rank)
}

/// Sort todos by priority rank only.
///
/// The sort is stable, so equal ranks keep the order the store returned
/// them in. No secondary key is applied.
pub fn sort_by_priority(todos: &mut [Todo]) {
    todos.sort_by_key(|todo| rank(todo.priority.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, priority: Option<Priority>) -> Todo {
        let mut todo = Todo::new(id, "task");
        todo.priority = priority;
        todo
    }

    #[test]
    fn test_rank_mapping() {
        assert_eq!(rank(Some(&Priority::High)), 0);
        assert_eq!(rank(Some(&Priority::Medium)), 1);
        assert_eq!(rank(Some(&Priority::Low)), 2);
        assert_eq!(rank(Some(&Priority::from("urgent"))), 3);
        assert_eq!(rank(None), 3);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Priority::from("high"), Priority::High);
        assert_eq!(
            Priority::from("HIGH"),
            Priority::Unrecognized("HIGH".to_string())
        );
    }

    #[test]
    fn test_unrecognized_round_trips_verbatim() {
        let json = serde_json::to_value(Priority::from("someday")).unwrap();
        assert_eq!(json, serde_json::json!("someday"));

        let parsed: Priority = serde_json::from_value(serde_json::json!("medium")).unwrap();
        assert_eq!(parsed, Priority::Medium);
    }

    #[test]
    fn test_badge_falls_back_to_low() {
        assert_eq!(Priority::High.badge(), "H");
        assert_eq!(Priority::Medium.badge(), "M");
        assert_eq!(Priority::from("later").badge(), "L");
    }

    #[test]
    fn test_default_is_low() {
        assert_eq!(Priority::default(), Priority::Low);
    }

    #[test]
    fn test_sort_keeps_store_order_for_ties() {
        let mut todos = vec![
            todo("a", Some(Priority::Low)),
            todo("b", None),
            todo("c", Some(Priority::High)),
            todo("d", Some(Priority::Low)),
            todo("e", Some(Priority::from("urgent"))),
            todo("f", Some(Priority::Medium)),
        ];

        sort_by_priority(&mut todos);

        let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "f", "a", "d", "b", "e"]);
    }
}
