//! Contracts for the collaborators the dashboard consumes.
//!
//! # Responsibility
//! - Replace hook-style data access with explicit calls that return `Result`.
//! - Keep the dashboard independent of how auth, tasks and routing are served.

use crate::model::task::Task;
use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authentication state as resolved by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    Loading,
    Authenticated(User),
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Session backend could not be reached or answered garbage.
    Unavailable(String),
    /// Stored session exists but is no longer accepted.
    SessionRejected,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "auth provider unavailable: {reason}"),
            Self::SessionRejected => write!(f, "session rejected"),
        }
    }
}

impl Error for AuthError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSourceError {
    Unauthorized,
    Backend(String),
}

impl Display for TaskSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "task source rejected the current user"),
            Self::Backend(reason) => write!(f, "task source failed: {reason}"),
        }
    }
}

impl Error for TaskSourceError {}

pub trait AuthProvider {
    fn resolve(&self) -> Result<AuthPhase, AuthError>;
}

/// Supplies the task collection visible to one user.
pub trait TaskSource {
    fn fetch_tasks(&self, user: &User) -> Result<Vec<Task>, TaskSourceError>;
}

pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

/// Auth provider that always reports the same phase.
///
/// Used by the CLI, where the user comes from configuration.
#[derive(Debug, Clone)]
pub struct StaticAuth {
    phase: AuthPhase,
}

impl StaticAuth {
    pub fn new(phase: AuthPhase) -> Self {
        Self { phase }
    }

    pub fn signed_in(user: User) -> Self {
        Self::new(AuthPhase::Authenticated(user))
    }
}

impl AuthProvider for StaticAuth {
    fn resolve(&self) -> Result<AuthPhase, AuthError> {
        Ok(self.phase.clone())
    }
}

/// Navigator that only remembers the routes it was sent to.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: &str) {
        self.visited.push(route.to_string());
    }
}
