//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserFilter};
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository backed by the `users` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the unique indexes backing the email/username uniqueness checks
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let unique = IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique.clone())
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique)
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Build a MongoDB filter document from UserFilter
    fn build_filter(filter: &UserFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref role) = filter.role {
            doc.insert("role", role.to_string());
        }

        doc
    }

    /// Build the login lookup filter. Emails are stored lowercased.
    fn login_filter(username_or_email: &str) -> Document {
        doc! {
            "$or": [
                { "username": username_or_email },
                { "email": username_or_email.to_lowercase() },
            ]
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let user = self.collection.find_one(filter).await?;
        Ok(user)
    }

    #[instrument(skip(self, username_or_email))]
    async fn get_by_login(&self, username_or_email: &str) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(Self::login_filter(username_or_email))
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: UserFilter) -> UserResult<Vec<User>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: UserFilter) -> UserResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        let filter = doc! { "_id": to_bson(&user.id).unwrap_or(Bson::Null) };
        let result = self.collection.replace_one(filter, &user).await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(user.id));
        }

        tracing::info!(user_id = %user.id, "User updated successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(user_id = %id, "User deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self, email))]
    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let filter = doc! { "email": email.to_lowercase() };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, username))]
    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let filter = doc! { "username": username };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }
}
