//! Completion-state filter for task snapshots.
//!
//! # Invariants
//! - Filtering never reorders or mutates the input.
//! - `Active` and `Completed` partition any snapshot.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [Self::All, Self::Active, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTaskFilterError(String);

impl Display for ParseTaskFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown task filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for ParseTaskFilterError {}

impl FromStr for TaskFilter {
    type Err = ParseTaskFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseTaskFilterError(other.to_string())),
        }
    }
}

/// Returns the tasks matching `filter`, in input order.
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<&Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// `"1 task"` or `"<n> tasks"`.
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

/// Text shown when a filter yields nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

impl EmptyState {
    pub fn for_filter(filter: TaskFilter) -> Self {
        match filter {
            TaskFilter::All => Self {
                title: "No tasks".to_string(),
                hint: "Add your first task to get started!".to_string(),
            },
            other => Self {
                title: format!("No {other} tasks"),
                hint: format!("No {other} tasks at the moment."),
            },
        }
    }
}
