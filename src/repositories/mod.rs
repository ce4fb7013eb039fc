//! Repository layer for data access operations.
//!
//! `UserRepository` is the seam between the service layer and the document
//! store. `MongoUserRepository` talks to MongoDB; `InMemoryUserRepository`
//! backs tests and dry runs.

mod memory_user_repo;
mod mongo_user_repo;

pub use memory_user_repo::InMemoryUserRepository;
pub use mongo_user_repo::MongoUserRepository;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::AppResult;
use crate::models::{UserChanges, UserRecord};

/// Persistence operations over user documents.
///
/// Lookups return `Ok(None)` for missing documents; mapping that to a
/// not-found response is the caller's job.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a fully initialized record and returns it.
    async fn create(&self, user: UserRecord) -> AppResult<UserRecord>;

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<UserRecord>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Applies `changes` and returns the document as it is after the update.
    async fn update_partial(
        &self,
        id: ObjectId,
        changes: UserChanges,
    ) -> AppResult<Option<UserRecord>>;

    /// Number of removed documents, 0 or 1.
    async fn delete_by_id(&self, id: ObjectId) -> AppResult<u64>;

    /// Round trip to the store, used by health checks.
    async fn ping(&self) -> AppResult<()>;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Repositories backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new()))
    }
}
