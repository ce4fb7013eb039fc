//! MongoDB implementation of `UserRepository`.

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use super::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::{USER_COLLECTION, UserChanges, UserRecord, bson_timestamp};

/// User repository over the `users` collection.
///
/// `Database` and `Collection` are handles onto the client's pool, so cloning
/// the repository is cheap.
#[derive(Clone)]
pub struct MongoUserRepository {
    database: Database,
    collection: Collection<UserRecord>,
}

impl MongoUserRepository {
    pub fn new(database: Database) -> Self {
        let collection = database.collection::<UserRecord>(USER_COLLECTION);
        Self {
            database,
            collection,
        }
    }

    /// Creates the unique e-mail index. Idempotent.
    pub async fn init_indexes(&self) -> AppResult<()> {
        self.collection
            .create_index(Self::email_index())
            .await
            .map_err(|e| AppError::database("create email index", e))?;
        tracing::info!(collection = USER_COLLECTION, "User indexes ready");
        Ok(())
    }

    fn email_index() -> IndexModel {
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_email_unique".to_string())
                    .build(),
            )
            .build()
    }

    /// `$set` document for a partial update. `updated_at` is always included.
    fn build_update(changes: &UserChanges) -> Document {
        let mut set = doc! {
            "updated_at": bson_timestamp::to_bson(changes.updated_at),
        };
        if let Some(first_name) = &changes.first_name {
            set.insert("first_name", first_name);
        }
        if let Some(last_name) = &changes.last_name {
            set.insert("last_name", last_name);
        }
        if let Some(image) = &changes.image {
            set.insert("image", image);
        }
        doc! { "$set": set }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: UserRecord) -> AppResult<UserRecord> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| AppError::database("insert user", e))?;

        tracing::info!("User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<UserRecord>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::database("find user by id", e))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::database("find user by email", e))
    }

    #[instrument(skip(self, changes))]
    async fn update_partial(
        &self,
        id: ObjectId,
        changes: UserChanges,
    ) -> AppResult<Option<UserRecord>> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, Self::build_update(&changes))
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::database("update user", e))?;

        if updated.is_some() {
            tracing::info!("User updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> AppResult<u64> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::database("delete user", e))?;

        tracing::info!(deleted = result.deleted_count, "User delete finished");
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> AppResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::database("ping", e))?;
        Ok(())
    }
}
