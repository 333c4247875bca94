//! Review Service - Business logic layer
//!
//! Owns the one-review-per-user rule, the author-only update rule, and the
//! rating aggregation.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::lookup::{AuthorLookup, EventLookup};
use crate::models::{
    CreateReview, RatingSummary, Review, ReviewFilter, ReviewListResponse, UpdateReview,
};
use crate::repository::ReviewRepository;

const MAX_LIMIT: i64 = 100;

/// Review service coordinating the repository and the domain lookups
pub struct ReviewService<R: ReviewRepository> {
    repository: Arc<R>,
    events: Arc<dyn EventLookup>,
    authors: Arc<dyn AuthorLookup>,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Create a new ReviewService with the given repository and lookups
    pub fn new(repository: R, events: Arc<dyn EventLookup>, authors: Arc<dyn AuthorLookup>) -> Self {
        Self {
            repository: Arc::new(repository),
            events,
            authors,
        }
    }

    async fn ensure_event_exists(&self, event_id: Uuid) -> ReviewResult<()> {
        if self.events.event_exists(event_id).await? {
            Ok(())
        } else {
            Err(ReviewError::EventNotFound(event_id))
        }
    }

    /// Create a review; one per user per event
    #[instrument(skip(self, input), fields(event_id = %input.event_id))]
    pub async fn create_review(&self, author_id: Uuid, input: CreateReview) -> ReviewResult<Review> {
        self.ensure_event_exists(input.event_id).await?;

        if self
            .repository
            .find_by_event_and_author(input.event_id, author_id)
            .await?
            .is_some()
        {
            return Err(ReviewError::AlreadyReviewed);
        }

        let author = self
            .authors
            .author_summary(author_id)
            .await?
            .ok_or(ReviewError::AuthorNotFound(author_id))?;

        self.repository.create(Review::new(input, author)).await
    }

    /// Get a review by ID
    #[instrument(skip(self))]
    pub async fn get_review(&self, id: Uuid) -> ReviewResult<Review> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ReviewError::NotFound(id))
    }

    /// List reviews with filters and a paginated envelope
    #[instrument(skip(self))]
    pub async fn list_reviews(&self, filter: ReviewFilter) -> ReviewResult<ReviewListResponse> {
        let filter = ReviewFilter {
            limit: filter.limit.clamp(1, MAX_LIMIT),
            ..filter
        };

        let total = self.repository.count(filter.clone()).await?;
        let reviews = self.repository.list(filter.clone()).await?;

        Ok(ReviewListResponse {
            total,
            limit: filter.limit,
            offset: filter.offset,
            items: reviews.into_iter().map(Into::into).collect(),
        })
    }

    /// List reviews for one event; 404 when the event does not exist
    #[instrument(skip(self, filter))]
    pub async fn list_event_reviews(
        &self,
        event_id: Uuid,
        filter: ReviewFilter,
    ) -> ReviewResult<ReviewListResponse> {
        self.ensure_event_exists(event_id).await?;

        self.list_reviews(ReviewFilter {
            event_id: Some(event_id),
            ..filter
        })
        .await
    }

    /// Update a review; only its author may do this
    #[instrument(skip(self, input))]
    pub async fn update_review(
        &self,
        id: Uuid,
        actor_id: Uuid,
        input: UpdateReview,
    ) -> ReviewResult<Review> {
        let mut review = self.get_review(id).await?;
        if !review.is_authored_by(actor_id) {
            return Err(ReviewError::NotAuthor);
        }

        review.apply_update(input);
        self.repository.update(review).await
    }

    /// Delete a review; the author or an admin may do this
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: Uuid, actor_id: Uuid, is_admin: bool) -> ReviewResult<()> {
        let review = self.get_review(id).await?;
        if !is_admin && !review.is_authored_by(actor_id) {
            return Err(ReviewError::NotAuthor);
        }

        if !self.repository.delete(id).await? {
            return Err(ReviewError::NotFound(id));
        }
        Ok(())
    }

    /// Aggregate rating figures for one event; 404 when it does not exist
    #[instrument(skip(self))]
    pub async fn rating_summary(&self, event_id: Uuid) -> ReviewResult<RatingSummary> {
        self.ensure_event_exists(event_id).await?;
        self.repository.rating_summary(event_id).await
    }
}

// Manual Clone implementation to avoid requiring R: Clone
impl<R: ReviewRepository> Clone for ReviewService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            events: Arc::clone(&self.events),
            authors: Arc::clone(&self.authors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{MockAuthorLookup, MockEventLookup};
    use crate::models::ReviewAuthor;
    use crate::repository::MockReviewRepository;
    use std::collections::BTreeMap;

    fn author(id: Uuid) -> ReviewAuthor {
        ReviewAuthor {
            id,
            username: "alice".to_string(),
            full_name: None,
        }
    }

    fn sample_review(event_id: Uuid, author_id: Uuid) -> Review {
        Review::new(
            CreateReview {
                event_id,
                rating: 4,
                comment: Some("Great show".to_string()),
            },
            author(author_id),
        )
    }

    fn known_event(event_id: Uuid) -> MockEventLookup {
        let mut events = MockEventLookup::new();
        events
            .expect_event_exists()
            .withf(move |id| *id == event_id)
            .returning(|_| Ok(true));
        events
    }

    fn service_with(
        repository: MockReviewRepository,
        events: MockEventLookup,
        authors: MockAuthorLookup,
    ) -> ReviewService<MockReviewRepository> {
        ReviewService::new(repository, Arc::new(events), Arc::new(authors))
    }

    #[tokio::test]
    async fn test_create_review_embeds_author() {
        let event_id = Uuid::now_v7();
        let author_id = Uuid::now_v7();

        let mut repository = MockReviewRepository::new();
        repository
            .expect_find_by_event_and_author()
            .returning(|_, _| Ok(None));
        repository.expect_create().returning(Ok);

        let mut authors = MockAuthorLookup::new();
        authors
            .expect_author_summary()
            .withf(move |id| *id == author_id)
            .returning(move |id| Ok(Some(author(id))));

        let service = service_with(repository, known_event(event_id), authors);
        let review = service
            .create_review(
                author_id,
                CreateReview {
                    event_id,
                    rating: 5,
                    comment: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(review.author.username, "alice");
        assert_eq!(review.rating, 5);
    }

    #[tokio::test]
    async fn test_create_review_unknown_event() {
        let mut repository = MockReviewRepository::new();
        repository.expect_create().never();

        let mut events = MockEventLookup::new();
        events.expect_event_exists().returning(|_| Ok(false));

        let service = service_with(repository, events, MockAuthorLookup::new());
        let err = service
            .create_review(
                Uuid::now_v7(),
                CreateReview {
                    event_id: Uuid::now_v7(),
                    rating: 3,
                    comment: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::EventNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_review_rejects_second_review() {
        let event_id = Uuid::now_v7();
        let author_id = Uuid::now_v7();

        let mut repository = MockReviewRepository::new();
        repository
            .expect_find_by_event_and_author()
            .returning(move |event_id, author_id| Ok(Some(sample_review(event_id, author_id))));
        repository.expect_create().never();

        let service = service_with(repository, known_event(event_id), MockAuthorLookup::new());
        let err = service
            .create_review(
                author_id,
                CreateReview {
                    event_id,
                    rating: 2,
                    comment: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::AlreadyReviewed));
    }

    #[tokio::test]
    async fn test_update_review_author_only() {
        let event_id = Uuid::now_v7();
        let author_id = Uuid::now_v7();
        let review = sample_review(event_id, author_id);
        let review_id = review.id;

        let mut repository = MockReviewRepository::new();
        let stored = review.clone();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_update().never();

        let service = service_with(repository, MockEventLookup::new(), MockAuthorLookup::new());
        let err = service
            .update_review(
                review_id,
                Uuid::now_v7(),
                UpdateReview {
                    rating: Some(1),
                    comment: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::NotAuthor));
    }

    #[tokio::test]
    async fn test_update_review_by_author() {
        let event_id = Uuid::now_v7();
        let author_id = Uuid::now_v7();
        let review = sample_review(event_id, author_id);

        let mut repository = MockReviewRepository::new();
        let stored = review.clone();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_update().returning(Ok);

        let service = service_with(repository, MockEventLookup::new(), MockAuthorLookup::new());
        let updated = service
            .update_review(
                review.id,
                author_id,
                UpdateReview {
                    rating: Some(5),
                    comment: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.rating, 5);
        assert_eq!(updated.comment.as_deref(), Some("Great show"));
    }

    #[tokio::test]
    async fn test_delete_review_admin_bypasses_author_check() {
        let review = sample_review(Uuid::now_v7(), Uuid::now_v7());
        let review_id = review.id;

        let mut repository = MockReviewRepository::new();
        let stored = review.clone();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == review_id)
            .returning(|_| Ok(true));

        let service = service_with(repository, MockEventLookup::new(), MockAuthorLookup::new());
        service
            .delete_review(review_id, Uuid::now_v7(), true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_review_stranger_is_rejected() {
        let review = sample_review(Uuid::now_v7(), Uuid::now_v7());
        let review_id = review.id;

        let mut repository = MockReviewRepository::new();
        let stored = review.clone();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_delete().never();

        let service = service_with(repository, MockEventLookup::new(), MockAuthorLookup::new());
        let err = service
            .delete_review(review_id, Uuid::now_v7(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::NotAuthor));
    }

    #[tokio::test]
    async fn test_list_reviews_clamps_limit() {
        let mut repository = MockReviewRepository::new();
        repository
            .expect_count()
            .withf(|filter| filter.limit == MAX_LIMIT)
            .returning(|_| Ok(0));
        repository
            .expect_list()
            .withf(|filter| filter.limit == MAX_LIMIT)
            .returning(|_| Ok(vec![]));

        let service = service_with(repository, MockEventLookup::new(), MockAuthorLookup::new());
        let page = service
            .list_reviews(ReviewFilter {
                limit: 9999,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.limit, MAX_LIMIT);
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_rating_summary_requires_event() {
        let mut repository = MockReviewRepository::new();
        repository.expect_rating_summary().never();

        let mut events = MockEventLookup::new();
        events.expect_event_exists().returning(|_| Ok(false));

        let service = service_with(repository, events, MockAuthorLookup::new());
        let err = service.rating_summary(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ReviewError::EventNotFound(_)));
    }

    #[tokio::test]
    async fn test_rating_summary_passes_through() {
        let event_id = Uuid::now_v7();

        let mut repository = MockReviewRepository::new();
        repository.expect_rating_summary().returning(|_| {
            let mut distribution = BTreeMap::new();
            for star in 1..=5 {
                distribution.insert(star.to_string(), u64::from(star == 4));
            }
            Ok(RatingSummary {
                average_rating: 4.0,
                ratings_count: 1,
                ratings_distribution: distribution,
            })
        });

        let service = service_with(
            repository,
            known_event(event_id),
            MockAuthorLookup::new(),
        );
        let summary = service.rating_summary(event_id).await.unwrap();

        assert_eq!(summary.average_rating, 4.0);
        assert_eq!(summary.ratings_count, 1);
        assert_eq!(summary.ratings_distribution.len(), 5);
        assert_eq!(summary.ratings_distribution["4"], 1);
    }
}
