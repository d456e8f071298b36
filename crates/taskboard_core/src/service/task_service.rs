//! Task use-case service.
//!
//! # Responsibility
//! - Provide owner-scoped create/update/toggle/delete/list APIs.
//! - Serve as the task collaborator for the dashboard.
//!
//! # Invariants
//! - Every mutation checks that the task belongs to the calling user.
//! - Mutations return the task as read back from storage.

use crate::filter::TaskFilter;
use crate::model::task::{Priority, Task, TaskId};
use crate::model::user::User;
use crate::repo::task_repo::{RepoError, TaskListQuery, TaskRepository};
use crate::service::collaborators::{TaskSource, TaskSourceError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    TaskNotFound(TaskId),
    /// Task exists but belongs to someone else.
    NotOwner(TaskId),
    Repo(RepoError),
    /// Write succeeded but the read-back did not match.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::NotOwner(id) => write!(f, "task {id} belongs to another user"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<TaskServiceError> for TaskSourceError {
    fn from(value: TaskServiceError) -> Self {
        match value {
            TaskServiceError::NotOwner(_) => Self::Unauthorized,
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Request model for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<i64>,
    pub due_date_end: Option<i64>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Option<Priority>>,
    pub category: Option<Option<String>>,
    pub due_date: Option<Option<i64>>,
    pub due_date_end: Option<Option<i64>>,
}

pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_task(&self, user_id: &str, request: NewTask) -> Result<Task, TaskServiceError> {
        let mut task = Task::new(user_id, request.title.trim());
        task.description = non_blank(request.description);
        task.priority = request.priority;
        task.category = non_blank(request.category);
        task.due_date = request.due_date;
        task.due_date_end = request.due_date_end;

        let id = self.repo.create_task(&task)?;
        info!("event=task_create module=service status=ok task_id={id}");
        self.read_back(id, "created task not found in read-back")
    }

    pub fn get_task(&self, user_id: &str, id: TaskId) -> Result<Task, TaskServiceError> {
        self.owned(user_id, id)
    }

    /// Lists one user's tasks, newest first.
    pub fn list_tasks(
        &self,
        user_id: &str,
        filter: TaskFilter,
    ) -> Result<Vec<Task>, TaskServiceError> {
        let query = TaskListQuery {
            filter,
            ..TaskListQuery::for_user(user_id)
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    pub fn update_task(
        &self,
        user_id: &str,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, TaskServiceError> {
        let mut task = self.owned(user_id, id)?;
        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = non_blank(description);
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(category) = patch.category {
            task.category = non_blank(category);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(due_date_end) = patch.due_date_end {
            task.due_date_end = due_date_end;
        }

        self.repo.update_task(&task)?;
        self.read_back(id, "updated task not found in read-back")
    }

    pub fn set_completed(
        &self,
        user_id: &str,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, TaskServiceError> {
        self.owned(user_id, id)?;
        self.repo.set_completed(id, completed)?;
        self.read_back(id, "task missing after completion change")
    }

    /// Flips the completion flag.
    pub fn toggle_task(&self, user_id: &str, id: TaskId) -> Result<Task, TaskServiceError> {
        let task = self.owned(user_id, id)?;
        self.repo.set_completed(id, !task.completed)?;
        self.read_back(id, "task missing after toggle")
    }

    pub fn delete_task(&self, user_id: &str, id: TaskId) -> Result<(), TaskServiceError> {
        self.owned(user_id, id)?;
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    fn owned(&self, user_id: &str, id: TaskId) -> Result<Task, TaskServiceError> {
        let task = self
            .repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        if task.user_id != user_id {
            warn!("event=task_access module=service status=error error_code=not_owner task_id={id}");
            return Err(TaskServiceError::NotOwner(id));
        }
        Ok(task)
    }

    fn read_back(&self, id: TaskId, context: &'static str) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::InconsistentState(context))
    }
}

impl<R: TaskRepository> TaskSource for TaskService<R> {
    fn fetch_tasks(&self, user: &User) -> Result<Vec<Task>, TaskSourceError> {
        Ok(self.list_tasks(&user.id, TaskFilter::All)?)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::non_blank;

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  a  ".to_string())), Some("a".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
