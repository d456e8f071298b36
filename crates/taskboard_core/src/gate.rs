//! Authentication gate for the dashboard.
//!
//! # Responsibility
//! - Decide, per auth notification, whether to show a placeholder, redirect,
//!   request the initial task fetch, or render.
//!
//! # Invariants
//! - `Loading` never causes a side effect.
//! - The sign-in redirect is issued at most once per signed-out stretch.
//! - The initial fetch is issued at most once per signed-in user until
//!   `reset_fetch` is called.
//! - Signing out, or a different user signing in, forgets the fetch.
//! - A completed fetch counts as fetched even when it returned no tasks.

use crate::service::collaborators::AuthPhase;

/// Whether the task collection has been requested yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    NotFetched,
    InFlight,
    Fetched,
}

/// Action the caller must perform for the current auth phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    ShowPlaceholder,
    Redirect(String),
    FetchTasks,
    Render,
    /// Already redirected; nothing left to do.
    Idle,
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    signin_route: String,
    redirected: bool,
    fetch: FetchState,
    /// User id the fetch state belongs to.
    fetched_for: Option<String>,
}

impl AuthGate {
    pub fn new(signin_route: impl Into<String>) -> Self {
        Self {
            signin_route: signin_route.into(),
            redirected: false,
            fetch: FetchState::NotFetched,
            fetched_for: None,
        }
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch
    }

    pub fn has_redirected(&self) -> bool {
        self.redirected
    }

    pub fn fetched_for(&self) -> Option<&str> {
        self.fetched_for.as_deref()
    }

    /// Returns the action for `phase` and records any side effect it implies.
    pub fn decide(&mut self, phase: &AuthPhase) -> GateDecision {
        match phase {
            AuthPhase::Loading => GateDecision::ShowPlaceholder,
            AuthPhase::Unauthenticated => {
                self.fetch = FetchState::NotFetched;
                self.fetched_for = None;
                if self.redirected {
                    GateDecision::Idle
                } else {
                    self.redirected = true;
                    GateDecision::Redirect(self.signin_route.clone())
                }
            }
            AuthPhase::Authenticated(user) => {
                self.redirected = false;
                if self.fetched_for.as_deref() != Some(user.id.as_str()) {
                    self.fetched_for = Some(user.id.clone());
                    self.fetch = FetchState::NotFetched;
                }
                match self.fetch {
                    FetchState::NotFetched => {
                        self.fetch = FetchState::InFlight;
                        GateDecision::FetchTasks
                    }
                    FetchState::InFlight | FetchState::Fetched => GateDecision::Render,
                }
            }
        }
    }

    /// Marks the in-flight fetch as finished, whatever its outcome.
    pub fn complete_fetch(&mut self) {
        self.fetch = FetchState::Fetched;
    }

    /// Allows the next authenticated decision to fetch again.
    pub fn reset_fetch(&mut self) {
        self.fetch = FetchState::NotFetched;
    }
}
