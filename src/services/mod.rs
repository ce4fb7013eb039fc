//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod user_service;

pub use user_service::{UserService, VERIFICATION_CODE_LEN, generate_verification_code};

use std::time::Duration;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    ///
    /// `operation_timeout` bounds every store call made by the services.
    pub fn new(repos: Repositories, operation_timeout: Duration) -> Self {
        Self {
            users: UserService::new(repos.users, operation_timeout),
        }
    }
}
