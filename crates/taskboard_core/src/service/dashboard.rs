//! Dashboard controller.
//!
//! # Responsibility
//! - Drive the auth gate against the collaborators and apply its decisions.
//! - Own the current task snapshot and the local UI state.
//! - Build the read-only view (greeting, stats, filtered list) on demand.
//!
//! # Invariants
//! - Stats and filtered tasks are derived from the current snapshot on every
//!   `view` call; nothing derived is cached.
//! - A failed fetch keeps the previous snapshot of the same user.
//! - The snapshot is dropped on sign-out and when another user signs in.
//! - Auth resolution errors are treated as unauthenticated.

use crate::filter::{count_label, filter_tasks, EmptyState, TaskFilter};
use crate::gate::{AuthGate, FetchState, GateDecision};
use crate::model::task::Task;
use crate::model::user::User;
use crate::service::collaborators::{
    AuthPhase, AuthProvider, Navigator, TaskSource, TaskSourceError,
};
use crate::stats::{compute_stats, DashboardStats};
use chrono::{DateTime, Local, TimeZone};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Top-level dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Overview,
    Tasks,
}

/// Local, non-persisted UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub view_mode: ViewMode,
    pub filter: TaskFilter,
    pub create_modal_open: bool,
    pub sidebar_open: bool,
    pub dark_mode: bool,
}

/// Everything the dashboard renders for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView<'a> {
    pub greeting: String,
    pub view_mode: ViewMode,
    pub filter: TaskFilter,
    pub stats: DashboardStats,
    pub tasks: Vec<&'a Task>,
    pub count_label: String,
    /// Set only when `tasks` is empty.
    pub empty_state: Option<EmptyState>,
    pub loading: bool,
}

pub struct DashboardController<A, S, N> {
    auth: A,
    source: S,
    navigator: N,
    gate: AuthGate,
    phase: AuthPhase,
    tasks: Vec<Task>,
    last_fetch_error: Option<TaskSourceError>,
    ui: UiState,
}

impl<A, S, N> DashboardController<A, S, N>
where
    A: AuthProvider,
    S: TaskSource,
    N: Navigator,
{
    pub fn new(auth: A, source: S, navigator: N, signin_route: impl Into<String>) -> Self {
        Self {
            auth,
            source,
            navigator,
            gate: AuthGate::new(signin_route),
            phase: AuthPhase::Loading,
            tasks: Vec::new(),
            last_fetch_error: None,
            ui: UiState::default(),
        }
    }

    /// Resolves auth once and performs whatever the gate decides.
    pub fn sync(&mut self) -> GateDecision {
        let phase = match self.auth.resolve() {
            Ok(phase) => phase,
            Err(err) => {
                warn!("event=auth_resolve module=dashboard status=error error={err}");
                AuthPhase::Unauthenticated
            }
        };

        if let AuthPhase::Authenticated(user) = &phase {
            if let Some(previous) = self.gate.fetched_for().filter(|id| *id != user.id) {
                info!(
                    "event=user_switch module=dashboard status=ok from={} to={}",
                    previous, user.id
                );
                self.clear_snapshot();
            }
        }

        let decision = self.gate.decide(&phase);
        debug!("event=gate_decision module=dashboard decision={decision:?}");

        match (&decision, &phase) {
            (GateDecision::Redirect(route), _) => {
                info!("event=redirect module=dashboard status=ok route={route}");
                self.clear_snapshot();
                self.navigator.navigate(route);
            }
            (GateDecision::FetchTasks, AuthPhase::Authenticated(user)) => {
                let user = user.clone();
                self.load(&user);
            }
            _ => {}
        }

        self.phase = phase;
        decision
    }

    /// Forces the next `sync` to fetch again, then runs it.
    pub fn refetch(&mut self) -> GateDecision {
        self.gate.reset_fetch();
        self.sync()
    }

    /// Installs a snapshot pushed by the task collaborator.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.last_fetch_error = None;
        self.gate.complete_fetch();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    pub fn last_fetch_error(&self) -> Option<&TaskSourceError> {
        self.last_fetch_error.as_ref()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.ui.view_mode = mode;
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.ui.filter = filter;
    }

    pub fn open_create_modal(&mut self) {
        self.ui.create_modal_open = true;
    }

    pub fn close_create_modal(&mut self) {
        self.ui.create_modal_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.ui.sidebar_open = !self.ui.sidebar_open;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.ui.dark_mode = !self.ui.dark_mode;
    }

    /// Builds the view against the local wall clock.
    pub fn view(&self) -> Option<DashboardView<'_>> {
        self.view_at(&Local::now())
    }

    /// Builds the view as of `now`; `None` unless authenticated.
    pub fn view_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DashboardView<'_>> {
        let AuthPhase::Authenticated(user) = &self.phase else {
            return None;
        };

        let tasks = filter_tasks(&self.tasks, self.ui.filter);
        let empty_state = tasks
            .is_empty()
            .then(|| EmptyState::for_filter(self.ui.filter));

        Some(DashboardView {
            greeting: user.greeting(),
            view_mode: self.ui.view_mode,
            filter: self.ui.filter,
            stats: compute_stats(&self.tasks, now),
            count_label: count_label(tasks.len()),
            tasks,
            empty_state,
            loading: self.gate.fetch_state() == FetchState::InFlight,
        })
    }

    fn clear_snapshot(&mut self) {
        self.tasks.clear();
        self.last_fetch_error = None;
    }

    fn load(&mut self, user: &User) {
        match self.source.fetch_tasks(user) {
            Ok(tasks) => {
                info!(
                    "event=tasks_fetch module=dashboard status=ok count={}",
                    tasks.len()
                );
                self.tasks = tasks;
                self.last_fetch_error = None;
            }
            Err(err) => {
                warn!("event=tasks_fetch module=dashboard status=error error={err}");
                self.last_fetch_error = Some(err);
            }
        }
        self.gate.complete_fetch();
    }
}
