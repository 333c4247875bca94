//! HTTP handlers for the Reviews API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AppError, AuthClaims, UuidPath, ValidatedJson,
};
use utoipa::OpenApi;

use crate::models::{
    CreateReview, RatingSummary, ReviewAuthor, ReviewFilter, ReviewListResponse, ReviewResponse,
    UpdateReview,
};
use crate::repository::ReviewRepository;
use crate::service::ReviewService;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_review,
        list_reviews,
        get_review,
        update_review,
        delete_review
    ),
    components(
        schemas(
            ReviewResponse,
            CreateReview,
            UpdateReview,
            ReviewListResponse,
            ReviewAuthor,
            RatingSummary
        ),
        responses(
            InternalServerErrorResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            ForbiddenResponse
        )
    ),
    tags(
        (name = "Reviews", description = "Event review endpoints")
    )
)]
pub struct ApiDoc;

/// Create the reviews router with all routes
pub fn router<R: ReviewRepository + 'static>(service: ReviewService<R>) -> Router {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .with_state(service)
}

/// Create a review for an event
#[utoipa::path(
    post,
    path = "",
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created successfully", body = ReviewResponse),
        (status = 400, description = "Validation failure or duplicate review"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, description = "Reviewed event does not exist"),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
async fn create_review<R: ReviewRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<ReviewService<R>>,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let review = service.create_review(claims.user_id()?, input).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

/// List reviews with optional filters
#[utoipa::path(
    get,
    path = "",
    params(ReviewFilter),
    responses(
        (status = 200, description = "Paginated list of reviews", body = ReviewListResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Reviews"
)]
async fn list_reviews<R: ReviewRepository>(
    State(service): State<ReviewService<R>>,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let page = service.list_reviews(filter).await?;
    Ok(Json(page))
}

/// Get a review by ID
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Reviews"
)]
async fn get_review<R: ReviewRepository>(
    State(service): State<ReviewService<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = service.get_review(id).await?;
    Ok(Json(ReviewResponse::from(review)))
}

/// Update a review (author only)
#[utoipa::path(
    put,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated successfully", body = ReviewResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
async fn update_review<R: ReviewRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<ReviewService<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = service.update_review(id, claims.user_id()?, input).await?;
    Ok(Json(ReviewResponse::from(review)))
}

/// Delete a review (author or admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
async fn delete_review<R: ReviewRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<ReviewService<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    service
        .delete_review(id, claims.user_id()?, claims.is_admin())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
