//! # Reviews Domain
//!
//! Event reviews for the events platform: one review per user per event,
//! author-owned edits, and per-event rating aggregation.
//!
//! ## Features
//!
//! - Reviews with a 1..=5 star rating, an optional comment, and denormalized
//!   author display data resolved through [`lookup`] ports
//! - One review per (event, user), enforced before insert
//! - Author-only updates; deletes by the author or an admin
//! - Per-event rating summary: average, count, per-star distribution
//!
//! ## Architecture
//!
//! ```text
//! handlers -> service -> repository (trait) -> mongodb
//!                '-> lookup ports (events, users)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_reviews::{MongoReviewRepository, ReviewService};
//! # use domain_reviews::lookup::{AuthorLookup, EventLookup};
//!
//! # async fn example(
//! #     db: mongodb::Database,
//! #     events: Arc<dyn EventLookup>,
//! #     authors: Arc<dyn AuthorLookup>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoReviewRepository::new(db);
//! repository.ensure_indexes().await?;
//!
//! let service = ReviewService::new(repository, events, authors);
//! let app = domain_reviews::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ReviewError, ReviewResult};
pub use handlers::{router, ApiDoc};
pub use lookup::{AuthorLookup, EventLookup};
pub use models::{
    CreateReview, RatingSummary, Review, ReviewAuthor, ReviewFilter, ReviewListResponse,
    ReviewResponse, UpdateReview,
};
pub use mongodb::MongoReviewRepository;
pub use repository::ReviewRepository;
pub use service::ReviewService;
