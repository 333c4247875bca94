//! Events API routes
//!
//! Wires the events domain to HTTP routes and adds the event-scoped review
//! endpoints, composed here because they read from the reviews domain.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{AppError, UuidPath};
use domain_events::{EventService, MongoEventRepository, handlers};
use domain_reviews::{
    MongoReviewRepository, RatingSummary, ReviewFilter, ReviewListResponse, ReviewService,
};

/// Create the events router
pub fn router(
    service: EventService<MongoEventRepository>,
    reviews: ReviewService<MongoReviewRepository>,
) -> Router {
    handlers::router(service).merge(
        Router::new()
            .route("/{id}/reviews", get(event_reviews))
            .route("/{id}/rating", get(event_rating))
            .with_state(reviews),
    )
}

/// List reviews left on an event
#[utoipa::path(
    get,
    path = "/api/events/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("min_rating" = Option<i32>, Query, description = "Keep reviews with at least this rating"),
        ("limit" = Option<i64>, Query, description = "Maximum number of results (default: 10)"),
        ("offset" = Option<u64>, Query, description = "Number of results to skip")
    ),
    responses(
        (status = 200, description = "Paginated reviews for the event", body = ReviewListResponse),
        (status = 400, description = "Invalid UUID"),
        (status = 404, description = "Event not found")
    ),
    tag = "Events"
)]
pub async fn event_reviews(
    State(reviews): State<ReviewService<MongoReviewRepository>>,
    UuidPath(id): UuidPath,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let page = reviews.list_event_reviews(id, filter).await?;
    Ok(Json(page))
}

/// Aggregated rating for an event
#[utoipa::path(
    get,
    path = "/api/events/{id}/rating",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Average rating and star distribution", body = RatingSummary),
        (status = 400, description = "Invalid UUID"),
        (status = 404, description = "Event not found")
    ),
    tag = "Events"
)]
pub async fn event_rating(
    State(reviews): State<ReviewService<MongoReviewRepository>>,
    UuidPath(id): UuidPath,
) -> Result<Json<RatingSummary>, AppError> {
    let summary = reviews.rating_summary(id).await?;
    Ok(Json(summary))
}
