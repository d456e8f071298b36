//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `tasks` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Lists are ordered by `created_at DESC, id ASC`.

use crate::db::DbError;
use crate::filter::TaskFilter;
use crate::model::task::{Priority, Task, TaskId, TaskValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    description,
    completed,
    priority,
    category,
    due_date,
    due_date_end,
    created_at,
    updated_at
FROM tasks";

const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    /// Restricts results to one owner when set.
    pub user_id: Option<String>,
    pub filter: TaskFilter,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl TaskListQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            &format!(
                "INSERT INTO tasks (
                    id,
                    user_id,
                    title,
                    description,
                    completed,
                    priority,
                    category,
                    due_date,
                    due_date_end,
                    created_at,
                    updated_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9,
                    COALESCE(?10, {NOW_SQL}),
                    COALESCE(?11, {NOW_SQL})
                );"
            ),
            params![
                task.id.to_string(),
                task.user_id.as_str(),
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.completed),
                task.priority.map(Priority::as_str),
                task.category.as_deref(),
                task.due_date,
                task.due_date_end,
                task.created_at.as_deref(),
                task.updated_at.as_deref(),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            &format!(
                "UPDATE tasks
                 SET
                    title = ?1,
                    description = ?2,
                    completed = ?3,
                    priority = ?4,
                    category = ?5,
                    due_date = ?6,
                    due_date_end = ?7,
                    updated_at = {NOW_SQL}
                 WHERE id = ?8;"
            ),
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.completed),
                task.priority.map(Priority::as_str),
                task.category.as_deref(),
                task.due_date,
                task.due_date_end,
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(user_id) = &query.user_id {
            sql.push_str(" AND user_id = ?");
            bind_values.push(Value::Text(user_id.clone()));
        }

        match query.filter {
            TaskFilter::All => {}
            TaskFilter::Active => sql.push_str(" AND completed = 0"),
            TaskFilter::Completed => sql.push_str(" AND completed = 1"),
        }

        sql.push_str(" ORDER BY created_at DESC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE tasks
                 SET
                    completed = ?1,
                    updated_at = {NOW_SQL}
                 WHERE id = ?2;"
            ),
            params![bool_to_int(completed), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in tasks.id"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let priority = match row.get::<_, Option<String>>("priority")? {
        Some(value) => Some(value.parse::<Priority>().map_err(|_| {
            RepoError::InvalidData(format!("invalid priority `{value}` in tasks.priority"))
        })?),
        None => None,
    };

    let task = Task {
        id,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        priority,
        category: row.get("category")?,
        due_date: row.get("due_date")?,
        due_date_end: row.get("due_date_end")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
