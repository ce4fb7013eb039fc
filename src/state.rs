//! Application state for Axum web framework.
//!
//! Built once at startup and injected into every handler; there are no
//! global singletons.

use std::time::Duration;

use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services.
///
/// Cloning is cheap since services hold their repositories behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
}

impl AppState {
    /// Creates a new AppState from the repositories.
    ///
    /// # Arguments
    /// * `repos` - Store handles, MongoDB or in-memory
    /// * `operation_timeout` - Deadline applied to every store call
    pub fn new(repos: Repositories, operation_timeout: Duration) -> Self {
        Self {
            services: Services::new(repos, operation_timeout),
        }
    }

    /// State backed by an in-memory store.
    pub fn in_memory(operation_timeout: Duration) -> Self {
        Self::new(Repositories::in_memory(), operation_timeout)
    }
}
