//! Category Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{
    Category, CategoryFilter, CategoryListResponse, CreateCategory, UpdateCategory,
};
use crate::repository::CategoryRepository;

const MAX_LIMIT: i64 = 100;

/// Category service enforcing name uniqueness on top of the repository
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Create a new CategoryService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category; duplicate names are rejected
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        if self.repository.name_exists(&input.name).await? {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let category = Category::new(input);
        self.repository.create(category).await
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// List categories sorted by name with a paginated envelope
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> CategoryResult<CategoryListResponse> {
        let filter = CategoryFilter {
            limit: filter.limit.clamp(1, MAX_LIMIT),
            ..filter
        };

        let total = self.repository.count().await?;
        let categories = self.repository.list(filter.clone()).await?;

        Ok(CategoryListResponse {
            total,
            limit: filter.limit,
            offset: filter.offset,
            items: categories.into_iter().map(Into::into).collect(),
        })
    }

    /// Update a category; renaming to an existing name is rejected
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        let mut category = self.get_category(id).await?;

        if let Some(ref new_name) = input.name {
            if *new_name != category.name && self.repository.name_exists(new_name).await? {
                return Err(CategoryError::DuplicateName(new_name.clone()));
            }
        }

        category.apply_update(input);
        self.repository.update(category).await
    }

    /// Delete a category
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}

// Manual Clone implementation to avoid requiring R: Clone
impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
