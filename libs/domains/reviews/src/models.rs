//! Review domain models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Display data of the review author, denormalized into the review document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewAuthor {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
}

/// Review entity stored in MongoDB
///
/// A review belongs to one event and one author; the author's display data
/// is embedded so review lists render without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// UUID primary key, stored as `_id`
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub event_id: Uuid,
    /// Star rating from 1 to 5
    pub rating: i32,
    pub comment: Option<String>,
    pub author: ReviewAuthor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub author: ReviewAuthor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            event_id: review.event_id,
            rating: review.rating,
            comment: review.comment,
            author: review.author,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// DTO for creating a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    /// Event being reviewed
    pub event_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// DTO for updating a review
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// Paginated review list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewListResponse {
    pub total: u64,
    pub limit: i64,
    pub offset: u64,
    pub items: Vec<ReviewResponse>,
}

/// Query parameters for listing reviews
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ReviewFilter {
    /// Filter by reviewed event
    pub event_id: Option<Uuid>,
    /// Filter by author
    pub author_id: Option<Uuid>,
    /// Keep reviews with at least this rating
    pub min_rating: Option<i32>,
    /// Maximum number of results (default: 10)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    10
}

/// Aggregated rating figures for one event
///
/// The distribution always carries the keys `"1"` through `"5"`, with zero
/// counts for stars nobody picked.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub ratings_count: u64,
    pub ratings_distribution: BTreeMap<String, u64>,
}

impl Review {
    /// Create a new review from validated input and its resolved author
    pub fn new(input: CreateReview, author: ReviewAuthor) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            event_id: input.event_id,
            rating: input.rating,
            comment: input.comment,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update
    pub fn apply_update(&mut self, update: UpdateReview) {
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(comment) = update.comment {
            self.comment = Some(comment);
        }
        self.updated_at = Utc::now();
    }

    /// Whether the given user wrote this review
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author.id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> ReviewAuthor {
        ReviewAuthor {
            id: Uuid::now_v7(),
            username: "alice".to_string(),
            full_name: Some("Alice A".to_string()),
        }
    }

    #[test]
    fn test_review_new_sets_defaults() {
        let input = CreateReview {
            event_id: Uuid::now_v7(),
            rating: 4,
            comment: Some("Great show".to_string()),
        };
        let review = Review::new(input.clone(), author());

        assert_eq!(review.event_id, input.event_id);
        assert_eq!(review.rating, 4);
        assert_eq!(review.comment.as_deref(), Some("Great show"));
        assert_eq!(review.created_at, review.updated_at);
    }

    #[test]
    fn test_create_review_validation() {
        let valid = CreateReview {
            event_id: Uuid::now_v7(),
            rating: 5,
            comment: None,
        };
        assert!(validator::Validate::validate(&valid).is_ok());

        let out_of_range = CreateReview {
            event_id: Uuid::now_v7(),
            rating: 6,
            comment: None,
        };
        assert!(validator::Validate::validate(&out_of_range).is_err());

        let long_comment = CreateReview {
            event_id: Uuid::now_v7(),
            rating: 3,
            comment: Some("x".repeat(1001)),
        };
        assert!(validator::Validate::validate(&long_comment).is_err());
    }

    #[test]
    fn test_apply_update_changes_only_given_fields() {
        let mut review = Review::new(
            CreateReview {
                event_id: Uuid::now_v7(),
                rating: 2,
                comment: Some("Meh".to_string()),
            },
            author(),
        );
        let created_at = review.created_at;

        review.apply_update(UpdateReview {
            rating: Some(4),
            comment: None,
        });

        assert_eq!(review.rating, 4);
        assert_eq!(review.comment.as_deref(), Some("Meh"));
        assert_eq!(review.created_at, created_at);
        assert!(review.updated_at > created_at);
    }

    #[test]
    fn test_is_authored_by() {
        let author = author();
        let review = Review::new(
            CreateReview {
                event_id: Uuid::now_v7(),
                rating: 5,
                comment: None,
            },
            author.clone(),
        );

        assert!(review.is_authored_by(author.id));
        assert!(!review.is_authored_by(Uuid::now_v7()));
    }

    #[test]
    fn test_review_serializes_id_as_underscore_id() {
        let review = Review::new(
            CreateReview {
                event_id: Uuid::now_v7(),
                rating: 5,
                comment: None,
            },
            author(),
        );

        let json = serde_json::to_value(&review).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());

        let response = ReviewResponse::from(review);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("id").is_some());
    }
}
