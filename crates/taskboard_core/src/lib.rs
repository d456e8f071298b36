//! Core logic for the TaskBoard dashboard.
//! This crate owns task statistics, filtering, the auth gate and the
//! reference task store.

pub mod config;
pub mod db;
pub mod filter;
pub mod gate;
pub mod landing;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use config::{AppConfig, ConfigError, UserConfig};
pub use filter::{count_label, filter_tasks, EmptyState, TaskFilter};
pub use gate::{AuthGate, FetchState, GateDecision};
pub use landing::{LandingState, Quote, QuoteCarousel, RevealSet, QUOTES};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::task::{Priority, Task, TaskId, TaskValidationError};
pub use model::user::User;
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskListQuery, TaskRepository,
};
pub use service::collaborators::{
    AuthError, AuthPhase, AuthProvider, Navigator, RecordingNavigator, StaticAuth, TaskSource,
    TaskSourceError,
};
pub use service::dashboard::{DashboardController, DashboardView, UiState, ViewMode};
pub use service::task_service::{NewTask, TaskPatch, TaskService, TaskServiceError};
pub use stats::{compute_stats, compute_stats_now, week_start, DashboardStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
