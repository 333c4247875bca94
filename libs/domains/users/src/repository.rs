use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{User, UserFilter};

/// Repository trait for User persistence
///
/// This trait defines the data access interface for users.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by username or email (for login)
    async fn get_by_login(&self, username_or_email: &str) -> UserResult<Option<User>>;

    /// List users with optional filters
    async fn list(&self, filter: UserFilter) -> UserResult<Vec<User>>;

    /// Count users matching a filter
    async fn count(&self, filter: UserFilter) -> UserResult<u64>;

    /// Replace an existing user document
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> UserResult<bool>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> UserResult<bool>;
}
