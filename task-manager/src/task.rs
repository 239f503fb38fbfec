use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single to-do entry as it is kept in memory and on disk.
///
/// The record itself performs no validation; callers are expected to reject
/// empty input before constructing one.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Task {
    title: String,
    description: String,
    category: String,
    completed: bool,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            completed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Marks the task as done. There is no way back to pending.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn status(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] - {}\nDescription: {}",
            self.title,
            self.category,
            self.status(),
            self.description
        )
    }
}
