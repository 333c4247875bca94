//! Repository trait for category data access

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryFilter};

/// Repository trait for category data access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// List categories sorted by name
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>>;

    /// Count all categories
    async fn count(&self) -> CategoryResult<u64>;

    /// Replace an existing category
    async fn update(&self, category: Category) -> CategoryResult<Category>;

    /// Delete a category, returning whether it existed
    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;

    /// Check whether a category name is already in use
    async fn name_exists(&self, name: &str) -> CategoryResult<bool>;
}
