//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Define the collaborator contracts consumed by the dashboard.

pub mod collaborators;
pub mod dashboard;
pub mod task_service;
