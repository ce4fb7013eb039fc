//! User service for business logic operations.
//!
//! Hashes passwords, issues verification codes, refreshes timestamps and
//! bounds every store call by the configured operation deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::oid::ObjectId;
use rand::Rng;

use crate::api::dto::{CreateUserRequest, UpdateUserRequest};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UserChanges, UserRecord};
use crate::repositories::UserRepository;
use crate::utils::password::hash_password;

pub const VERIFICATION_CODE_LEN: usize = 6;

/// User service for handling user-related business logic.
///
/// Cloning is cheap: the repository sits behind an `Arc`.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    operation_timeout: Duration,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, operation_timeout: Duration) -> Self {
        Self {
            repo,
            operation_timeout,
        }
    }

    /// Registers a new, unverified user.
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserRecord> {
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal { source: e.into() })??;

        let record = NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
            image: request.image,
            verification_code: generate_verification_code(),
        }
        .before_create();

        self.bounded("insert user", self.repo.create(record)).await
    }

    /// Gets a user by their ID, or `NotFound`.
    pub async fn get_user(&self, id: ObjectId) -> AppResult<UserRecord> {
        self.bounded("find user by id", self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id.to_hex()))
    }

    /// Gets a user by their email address, or `NotFound`.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<UserRecord> {
        self.bounded("find user by email", self.repo.find_by_email(email))
            .await?
            .ok_or_else(|| AppError::not_found("user", "email", email))
    }

    /// Applies the supplied fields and refreshes `updated_at`.
    ///
    /// An update without fields still moves `updated_at` forward.
    pub async fn update_user(
        &self,
        id: ObjectId,
        request: UpdateUserRequest,
    ) -> AppResult<UserRecord> {
        let mut existing = self.get_user(id).await?;

        let changes = UserChanges {
            first_name: request.first_name,
            last_name: request.last_name,
            image: request.image,
            updated_at: existing.touch(),
        };

        self.bounded("update user", self.repo.update_partial(id, changes))
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id.to_hex()))
    }

    /// Deletes a user, or `NotFound` when nothing was removed.
    pub async fn delete_user(&self, id: ObjectId) -> AppResult<()> {
        let deleted = self.bounded("delete user", self.repo.delete_by_id(id)).await?;
        if deleted == 0 {
            return Err(AppError::not_found("user", "id", id.to_hex()));
        }
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.bounded("ping", self.repo.ping()).await
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.operation_timeout, fut)
            .await
            .map_err(|_| AppError::Timeout {
                operation: operation.to_string(),
            })?
    }
}

/// Six uniformly distributed decimal digits from a CSPRNG.
pub fn generate_verification_code() -> String {
    let mut rng = rand::rng();
    (0..VERIFICATION_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
