use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ReviewResult;
use crate::models::{RatingSummary, Review, ReviewFilter};

/// Repository abstraction for review persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review
    async fn create(&self, review: Review) -> ReviewResult<Review>;

    /// Fetch a review by its ID
    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>>;

    /// List reviews matching the filter, newest first
    async fn list(&self, filter: ReviewFilter) -> ReviewResult<Vec<Review>>;

    /// Count reviews matching the filter
    async fn count(&self, filter: ReviewFilter) -> ReviewResult<u64>;

    /// Replace an existing review
    async fn update(&self, review: Review) -> ReviewResult<Review>;

    /// Delete a review; returns false when it did not exist
    async fn delete(&self, id: Uuid) -> ReviewResult<bool>;

    /// Fetch the review a user left on an event, if any
    async fn find_by_event_and_author(
        &self,
        event_id: Uuid,
        author_id: Uuid,
    ) -> ReviewResult<Option<Review>>;

    /// Aggregate rating figures for one event
    async fn rating_summary(&self, event_id: Uuid) -> ReviewResult<RatingSummary>;
}
