//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter};
use crate::repository::CategoryRepository;

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    /// Create a new MongoCategoryRepository backed by the `categories` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Category>("categories");
        Self { collection }
    }

    /// Create a new MongoCategoryRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Category>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Category> {
        &self.collection
    }

    /// Create the unique index backing the name uniqueness check
    pub async fn ensure_indexes(&self) -> CategoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(name = %category.name))]
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let category = self.collection.find_one(filter).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "name": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> CategoryResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn update(&self, category: Category) -> CategoryResult<Category> {
        let filter = doc! { "_id": to_bson(&category.id).unwrap_or(Bson::Null) };
        let result = self.collection.replace_one(filter, &category).await?;

        if result.matched_count == 0 {
            return Err(CategoryError::NotFound(category.id));
        }

        tracing::info!(category_id = %category.id, "Category updated successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(category_id = %id, "Category deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self, name))]
    async fn name_exists(&self, name: &str) -> CategoryResult<bool> {
        let filter = doc! { "name": name };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }
}
