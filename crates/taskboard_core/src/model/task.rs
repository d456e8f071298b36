//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, stats and filter code.
//! - Validate field limits before persistence and after deserialization.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-blank and at most `MAX_TITLE_CHARS` characters.
//! - `due_date_end` is not earlier than `due_date` when both are set.
//! - `created_at` keeps the raw timestamp text; parsing happens at read time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
pub const MAX_CATEGORY_CHARS: usize = 100;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// Optional task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(TaskValidationError::UnknownPriority(other.to_string())),
        }
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyTitle,
    TitleTooLong { chars: usize },
    DescriptionTooLong { chars: usize },
    CategoryTooLong { chars: usize },
    InvalidDueWindow { start: i64, end: i64 },
    UnknownPriority(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::TitleTooLong { chars } => write!(
                f,
                "task title has {chars} chars; limit is {MAX_TITLE_CHARS}"
            ),
            Self::DescriptionTooLong { chars } => write!(
                f,
                "task description has {chars} chars; limit is {MAX_DESCRIPTION_CHARS}"
            ),
            Self::CategoryTooLong { chars } => write!(
                f,
                "task category has {chars} chars; limit is {MAX_CATEGORY_CHARS}"
            ),
            Self::InvalidDueWindow { start, end } => write!(
                f,
                "due_date_end ({end}) must be >= due_date ({start})"
            ),
            Self::UnknownPriority(value) => write!(
                f,
                "unknown priority `{value}`; expected low|medium|high"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Timestamps arrive from the task collaborator as text and are kept as-is,
/// so a malformed value degrades the weekly count instead of failing a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire")]
pub struct Task {
    pub id: TaskId,
    /// Owner identity as issued by the auth collaborator.
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    /// Unix epoch milliseconds. Must be >= `due_date` when both are set.
    pub due_date_end: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Deserialize)]
struct TaskWire {
    id: TaskId,
    user_id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    due_date: Option<i64>,
    #[serde(default)]
    due_date_end: Option<i64>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(wire: TaskWire) -> Result<Self, Self::Error> {
        let task = Self {
            id: wire.id,
            user_id: wire.user_id,
            title: wire.title,
            description: wire.description,
            completed: wire.completed,
            priority: wire.priority,
            category: wire.category,
            due_date: wire.due_date,
            due_date_end: wire.due_date_end,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates an open task with a generated id and no optional fields.
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            completed: false,
            priority: None,
            category: None,
            due_date: None,
            due_date_end: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: TaskId,
        user_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let mut task = Self::new(user_id, title);
        task.id = id;
        Ok(task)
    }

    /// Checks every field limit and the due window.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let title_chars = self.title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            return Err(TaskValidationError::TitleTooLong { chars: title_chars });
        }
        if let Some(description) = &self.description {
            let chars = description.chars().count();
            if chars > MAX_DESCRIPTION_CHARS {
                return Err(TaskValidationError::DescriptionTooLong { chars });
            }
        }
        if let Some(category) = &self.category {
            let chars = category.chars().count();
            if chars > MAX_CATEGORY_CHARS {
                return Err(TaskValidationError::CategoryTooLong { chars });
            }
        }
        if let (Some(start), Some(end)) = (self.due_date, self.due_date_end) {
            if end < start {
                return Err(TaskValidationError::InvalidDueWindow { start, end });
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskValidationError, MAX_TITLE_CHARS};

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(
            "urgent".parse::<Priority>().unwrap_err(),
            TaskValidationError::UnknownPriority("urgent".to_string())
        );
    }

    #[test]
    fn validate_counts_chars_not_bytes() {
        let task = Task::new("u1", "é".repeat(MAX_TITLE_CHARS));
        assert!(task.validate().is_ok());
    }
}
