//! In-process implementation of `UserRepository`.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::{UserChanges, UserRecord};

/// Map-backed user store with the same uniqueness rules as the MongoDB
/// collection (unique `_id`, unique `email`).
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, UserRecord>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: UserRecord) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(AppError::database(
                "insert user",
                anyhow!("E11000 duplicate key error"),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_partial(
        &self,
        id: ObjectId,
        changes: UserChanges,
    ) -> AppResult<Option<UserRecord>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_by_id(&self, id: ObjectId) -> AppResult<u64> {
        Ok(self.users.write().await.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
