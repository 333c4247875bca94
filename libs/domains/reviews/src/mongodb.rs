//! MongoDB implementation of ReviewRepository

use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{RatingSummary, Review, ReviewFilter};
use crate::repository::ReviewRepository;

/// MongoDB implementation of the ReviewRepository
pub struct MongoReviewRepository {
    collection: Collection<Review>,
}

impl MongoReviewRepository {
    /// Create a new MongoReviewRepository backed by the `reviews` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Review>("reviews");
        Self { collection }
    }

    /// Create a new MongoReviewRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Review>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Review> {
        &self.collection
    }

    /// Create the index backing per-event review lookups
    pub async fn ensure_indexes(&self) -> ReviewResult<()> {
        let index = IndexModel::builder().keys(doc! { "event_id": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    /// Build a MongoDB filter document from a ReviewFilter
    fn build_filter(filter: &ReviewFilter) -> Document {
        let mut doc = Document::new();

        if let Some(event_id) = filter.event_id {
            doc.insert("event_id", to_bson(&event_id).unwrap_or(Bson::Null));
        }

        if let Some(author_id) = filter.author_id {
            doc.insert("author.id", to_bson(&author_id).unwrap_or(Bson::Null));
        }

        if let Some(min_rating) = filter.min_rating {
            doc.insert("rating", doc! { "$gte": min_rating });
        }

        doc
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    #[instrument(skip(self, review), fields(event_id = %review.event_id))]
    async fn create(&self, review: Review) -> ReviewResult<Review> {
        self.collection.insert_one(&review).await?;
        tracing::info!(review_id = %review.id, event_id = %review.event_id, "Review created");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let review = self.collection.find_one(filter).await?;
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ReviewFilter) -> ReviewResult<Vec<Review>> {
        use futures_util::TryStreamExt;

        let query = Self::build_filter(&filter);
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(filter.offset)
            .limit(filter.limit)
            .build();

        let cursor = self.collection.find(query).with_options(options).await?;
        let reviews: Vec<Review> = cursor.try_collect().await?;
        Ok(reviews)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ReviewFilter) -> ReviewResult<u64> {
        let query = Self::build_filter(&filter);
        let count = self.collection.count_documents(query).await?;
        Ok(count)
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn update(&self, review: Review) -> ReviewResult<Review> {
        let filter = doc! { "_id": to_bson(&review.id).unwrap_or(Bson::Null) };
        let result = self.collection.replace_one(filter, &review).await?;

        if result.matched_count == 0 {
            return Err(ReviewError::NotFound(review.id));
        }

        tracing::info!(review_id = %review.id, "Review updated");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ReviewResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count > 0 {
            tracing::info!(review_id = %id, "Review deleted");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn find_by_event_and_author(
        &self,
        event_id: Uuid,
        author_id: Uuid,
    ) -> ReviewResult<Option<Review>> {
        let filter = doc! {
            "event_id": to_bson(&event_id).unwrap_or(Bson::Null),
            "author.id": to_bson(&author_id).unwrap_or(Bson::Null),
        };
        let review = self.collection.find_one(filter).await?;
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn rating_summary(&self, event_id: Uuid) -> ReviewResult<RatingSummary> {
        let base = doc! { "event_id": to_bson(&event_id).unwrap_or(Bson::Null) };
        let total = self.collection.count_documents(base.clone()).await?;

        // Count per star value
        let mut distribution = BTreeMap::new();
        let mut sum: u64 = 0;
        for rating in 1..=5i32 {
            let mut query = base.clone();
            query.insert("rating", rating);
            let count = self.collection.count_documents(query).await?;
            sum += rating as u64 * count;
            distribution.insert(rating.to_string(), count);
        }

        let average_rating = if total == 0 {
            0.0
        } else {
            (sum as f64 / total as f64 * 100.0).round() / 100.0
        };

        Ok(RatingSummary {
            average_rating,
            ratings_count: total,
            ratings_distribution: distribution,
        })
    }
}
