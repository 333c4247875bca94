//! Integration tests for Reviews domain
//!
//! These tests use real MongoDB via testcontainers to verify filter
//! documents, the per-event rating aggregation, and the service-level
//! duplicate and authorship rules.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain_reviews::*;
use futures::future::join_all;
use test_utils::{assertions::*, TestMongo};
use uuid::Uuid;

/// In-memory lookup directory standing in for the other domains
#[derive(Default)]
struct Directory {
    events: HashSet<Uuid>,
    users: HashMap<Uuid, ReviewAuthor>,
}

#[async_trait]
impl EventLookup for Directory {
    async fn event_exists(&self, id: Uuid) -> ReviewResult<bool> {
        Ok(self.events.contains(&id))
    }
}

#[async_trait]
impl AuthorLookup for Directory {
    async fn author_summary(&self, id: Uuid) -> ReviewResult<Option<ReviewAuthor>> {
        Ok(self.users.get(&id).cloned())
    }
}

fn author(username: &str) -> ReviewAuthor {
    ReviewAuthor {
        id: Uuid::now_v7(),
        username: username.to_string(),
        full_name: None,
    }
}

fn review_input(event_id: Uuid, rating: i32) -> CreateReview {
    CreateReview {
        event_id,
        rating,
        comment: Some("Great show".to_string()),
    }
}

/// Service wired to a fresh repository and a directory seeded with the
/// given users plus one known event.
async fn service_against(
    mongo: &TestMongo,
    db_name: &str,
    users: &[ReviewAuthor],
) -> (ReviewService<MongoReviewRepository>, Uuid) {
    let repository = MongoReviewRepository::new(mongo.database(db_name));
    repository.ensure_indexes().await.unwrap();

    let event_id = Uuid::now_v7();
    let mut directory = Directory::default();
    directory.events.insert(event_id);
    for user in users {
        directory.users.insert(user.id, user.clone());
    }
    let directory = Arc::new(directory);

    let service = ReviewService::new(repository, directory.clone(), directory.clone());
    (service, event_id)
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_review() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(mongo.database("reviews_create"));

    let alice = ReviewAuthor {
        id: Uuid::now_v7(),
        username: "alice".to_string(),
        full_name: Some("Alice A".to_string()),
    };
    let event_id = Uuid::now_v7();
    let review = Review::new(review_input(event_id, 4), alice.clone());
    let review_id = review.id;

    let created = repo.create(review).await.unwrap();
    assert_uuid_eq(created.id, review_id, "created review id");

    let retrieved = repo.get_by_id(review_id).await.unwrap();
    let retrieved = assert_some(retrieved, "review should exist");
    assert_uuid_eq(retrieved.event_id, event_id, "reviewed event");
    assert_eq!(retrieved.rating, 4);
    assert_eq!(retrieved.comment.as_deref(), Some("Great show"));
    assert_eq!(retrieved.author, alice);
}

#[tokio::test]
async fn test_list_filters_against_mongo() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(mongo.database("reviews_filters"));

    let alice = author("alice");
    let bob = author("bob");
    let event_a = Uuid::now_v7();
    let event_b = Uuid::now_v7();

    repo.create(Review::new(review_input(event_a, 5), alice.clone()))
        .await
        .unwrap();
    // Distinct timestamps keep the newest-first order deterministic
    tokio::time::sleep(Duration::from_millis(5)).await;
    repo.create(Review::new(review_input(event_a, 2), bob.clone()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    repo.create(Review::new(review_input(event_b, 3), alice.clone()))
        .await
        .unwrap();

    // By event
    let filter = ReviewFilter {
        event_id: Some(event_a),
        ..Default::default()
    };
    let reviews = repo.list(filter.clone()).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(repo.count(filter).await.unwrap(), 2);
    // Newest first
    assert_eq!(reviews[0].author.username, "bob");
    assert_eq!(reviews[1].author.username, "alice");

    // By author, matched on the embedded summary id
    let by_alice = repo
        .list(ReviewFilter {
            author_id: Some(alice.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_alice.len(), 2);

    // Rating floor
    let high = repo
        .list(ReviewFilter {
            min_rating: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(high.len(), 2);
    assert!(high.iter().all(|r| r.rating >= 3));

    // Combined
    let filter = ReviewFilter {
        event_id: Some(event_a),
        min_rating: Some(3),
        ..Default::default()
    };
    assert_eq!(repo.count(filter).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_and_delete_review() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(mongo.database("reviews_update"));

    let review = repo
        .create(Review::new(review_input(Uuid::now_v7(), 2), author("alice")))
        .await
        .unwrap();

    let mut updated = review.clone();
    updated.apply_update(UpdateReview {
        rating: Some(4),
        comment: Some("Better on a second look".to_string()),
    });
    let updated = repo.update(updated).await.unwrap();
    assert_eq!(updated.rating, 4);
    assert_eq!(updated.comment.as_deref(), Some("Better on a second look"));
    assert!(updated.updated_at > review.updated_at);

    assert!(repo.delete(review.id).await.unwrap());
    assert!(repo.get_by_id(review.id).await.unwrap().is_none());
    assert!(!repo.delete(review.id).await.unwrap());

    // Updating a deleted review reports NotFound
    let err = repo.update(updated).await.unwrap_err();
    assert!(matches!(err, ReviewError::NotFound(_)));
}

#[tokio::test]
async fn test_find_by_event_and_author() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(mongo.database("reviews_find"));

    let alice = author("alice");
    let event_id = Uuid::now_v7();
    repo.create(Review::new(review_input(event_id, 5), alice.clone()))
        .await
        .unwrap();

    let found = repo
        .find_by_event_and_author(event_id, alice.id)
        .await
        .unwrap();
    let found = assert_some(found, "review should be found");
    assert_eq!(found.rating, 5);

    // Same author, different event
    assert!(repo
        .find_by_event_and_author(Uuid::now_v7(), alice.id)
        .await
        .unwrap()
        .is_none());

    // Same event, different author
    assert!(repo
        .find_by_event_and_author(event_id, Uuid::now_v7())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_rating_summary_math() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(mongo.database("reviews_summary"));

    let event_a = Uuid::now_v7();
    let event_b = Uuid::now_v7();
    for rating in [5, 4, 4, 3] {
        repo.create(Review::new(
            review_input(event_a, rating),
            author(&format!("user{rating}")),
        ))
        .await
        .unwrap();
    }
    // Another event's rating must not leak into the summary
    repo.create(Review::new(review_input(event_b, 1), author("grump")))
        .await
        .unwrap();

    let summary = repo.rating_summary(event_a).await.unwrap();
    assert_eq!(summary.average_rating, 4.0);
    assert_eq!(summary.ratings_count, 4);
    assert_eq!(summary.ratings_distribution["1"], 0);
    assert_eq!(summary.ratings_distribution["2"], 0);
    assert_eq!(summary.ratings_distribution["3"], 1);
    assert_eq!(summary.ratings_distribution["4"], 2);
    assert_eq!(summary.ratings_distribution["5"], 1);

    // No reviews at all
    let empty = repo.rating_summary(Uuid::now_v7()).await.unwrap();
    assert_eq!(empty.average_rating, 0.0);
    assert_eq!(empty.ratings_count, 0);
    assert_eq!(empty.ratings_distribution.len(), 5);
    assert!(empty.ratings_distribution.values().all(|&count| count == 0));
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_enforces_one_review_per_user() {
    let mongo = TestMongo::new().await;
    let alice = author("alice");
    let (service, event_id) = service_against(&mongo, "svc_dup", &[alice.clone()]).await;

    service
        .create_review(alice.id, review_input(event_id, 5))
        .await
        .unwrap();

    let err = service
        .create_review(alice.id, review_input(event_id, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::AlreadyReviewed));

    // Unknown event is rejected before any write
    let err = service
        .create_review(alice.id, review_input(Uuid::now_v7(), 3))
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::EventNotFound(_)));

    // Unknown author resolves to a 404 as well
    let err = service
        .create_review(Uuid::now_v7(), review_input(event_id, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::AuthorNotFound(_)));
}

#[tokio::test]
async fn test_service_list_event_reviews() {
    let mongo = TestMongo::new().await;
    let alice = author("alice");
    let bob = author("bob");
    let (service, event_id) =
        service_against(&mongo, "svc_list", &[alice.clone(), bob.clone()]).await;

    service
        .create_review(alice.id, review_input(event_id, 5))
        .await
        .unwrap();
    service
        .create_review(bob.id, review_input(event_id, 3))
        .await
        .unwrap();

    let page = service
        .list_event_reviews(event_id, ReviewFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let err = service
        .list_event_reviews(Uuid::now_v7(), ReviewFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::EventNotFound(_)));
}

#[tokio::test]
async fn test_service_author_rules_end_to_end() {
    let mongo = TestMongo::new().await;
    let alice = author("alice");
    let bob = author("bob");
    let (service, event_id) =
        service_against(&mongo, "svc_author", &[alice.clone(), bob.clone()]).await;

    let review = service
        .create_review(alice.id, review_input(event_id, 2))
        .await
        .unwrap();

    let err = service
        .update_review(
            review.id,
            bob.id,
            UpdateReview {
                rating: Some(1),
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::NotAuthor));

    let updated = service
        .update_review(
            review.id,
            alice.id,
            UpdateReview {
                rating: Some(4),
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 4);

    let err = service
        .delete_review(review.id, bob.id, false)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::NotAuthor));

    service.delete_review(review.id, bob.id, true).await.unwrap();
    let err = service.get_review(review.id).await.unwrap_err();
    assert!(matches!(err, ReviewError::NotFound(_)));
}

// ============================================================================
// Concurrent Operations
// ============================================================================

#[tokio::test]
async fn test_concurrent_reviews_from_distinct_users() {
    let mongo = TestMongo::new().await;
    let users: Vec<ReviewAuthor> = (0..4).map(|i| author(&format!("user{i}"))).collect();
    let (service, event_id) = service_against(&mongo, "svc_concurrent", &users).await;

    let results = join_all(
        users
            .iter()
            .map(|user| service.create_review(user.id, review_input(event_id, 4))),
    )
    .await;
    for result in results {
        result.unwrap();
    }

    let summary = service.rating_summary(event_id).await.unwrap();
    assert_eq!(summary.ratings_count, 4);
    assert_eq!(summary.average_rating, 4.0);
    assert_eq!(summary.ratings_distribution["4"], 4);
}
