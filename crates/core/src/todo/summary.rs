//! Completed / pending breakdown of a todo collection

use serde::Serialize;

use super::model::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub completed: usize,
    pub pending: usize,
}

impl CompletionSummary {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            completed,
            pending: todos.len() - completed,
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.pending
    }

    /// Whole percentage of completed todos; 0 for an empty collection
    pub fn completed_percent(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total() as f64) * 100.0).round() as u32
    }

    pub fn pending_percent(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        100 - self.completed_percent()
    }

    /// e.g. "2 of 5 tasks completed"
    pub fn headline(&self) -> String {
        format!("{} of {} tasks completed", self.completed, self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos(completed: &[bool]) -> Vec<Todo> {
        completed
            .iter()
            .enumerate()
            .map(|(i, done)| {
                let mut todo = Todo::new(format!("-{}", i), "task");
                todo.completed = *done;
                todo
            })
            .collect()
    }

    #[test]
    fn test_counts_and_headline() {
        let summary = CompletionSummary::from_todos(&todos(&[true, false, false]));
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.headline(), "1 of 3 tasks completed");
        assert_eq!(summary.completed_percent(), 33);
        assert_eq!(summary.pending_percent(), 67);
    }

    #[test]
    fn test_empty_collection() {
        let summary = CompletionSummary::from_todos(&[]);
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.completed_percent(), 0);
        assert_eq!(summary.pending_percent(), 0);
        assert_eq!(summary.headline(), "0 of 0 tasks completed");
    }
}
