//! HTTP handlers for the Venues API

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
    AdminClaims, AppError, UuidPath, ValidatedJson,
};
use utoipa::OpenApi;

use crate::models::{
    CreateVenue, NearQuery, UpdateVenue, VenueFilter, VenueListResponse, VenueResponse,
};
use crate::repository::VenueRepository;
use crate::service::VenueService;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_venue,
        list_venues,
        find_nearby,
        get_venue,
        update_venue,
        delete_venue
    ),
    components(
        schemas(VenueResponse, CreateVenue, UpdateVenue, VenueListResponse),
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
        (name = "Venues", description = "Venue management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the venues router with all routes
pub fn router<R: VenueRepository + 'static>(service: VenueService<R>) -> Router {
    Router::new()
        .route("/", get(list_venues).post(create_venue))
        .route("/near", get(find_nearby))
        .route(
            "/{id}",
            get(get_venue).put(update_venue).delete(delete_venue),
        )
        .with_state(service)
}

/// Create a new venue
#[utoipa::path(
    post,
    path = "",
    request_body = CreateVenue,
    responses(
        (status = 201, description = "Venue created successfully", body = VenueResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Venues"
)]
async fn create_venue<R: VenueRepository>(
    AdminClaims(_claims): AdminClaims,
    State(service): State<VenueService<R>>,
    ValidatedJson(input): ValidatedJson<CreateVenue>,
) -> Result<(StatusCode, Json<VenueResponse>), AppError> {
    let venue = service.create_venue(input).await?;
    Ok((StatusCode::CREATED, Json(VenueResponse::from(venue))))
}

/// List venues with optional filters
#[utoipa::path(
    get,
    path = "",
    params(VenueFilter),
    responses(
        (status = 200, description = "Paginated list of venues", body = VenueListResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Venues"
)]
async fn list_venues<R: VenueRepository>(
    State(service): State<VenueService<R>>,
    Query(filter): Query<VenueFilter>,
) -> Result<Json<VenueListResponse>, AppError> {
    let page = service.list_venues(filter).await?;
    Ok(Json(page))
}

/// Find venues near a point, ordered by distance
#[utoipa::path(
    get,
    path = "/near",
    params(NearQuery),
    responses(
        (status = 200, description = "Venues ordered by distance from the point", body = [VenueResponse]),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Venues"
)]
async fn find_nearby<R: VenueRepository>(
    State(service): State<VenueService<R>>,
    Query(query): Query<NearQuery>,
) -> Result<Json<Vec<VenueResponse>>, AppError> {
    let venues = service.find_nearby(query).await?;
    Ok(Json(venues))
}

/// Get a venue by ID
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Venue ID")
    ),
    responses(
        (status = 200, description = "Venue found", body = VenueResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Venues"
)]
async fn get_venue<R: VenueRepository>(
    State(service): State<VenueService<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<VenueResponse>, AppError> {
    let venue = service.get_venue(id).await?;
    Ok(Json(VenueResponse::from(venue)))
}

/// Update a venue
#[utoipa::path(
    put,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Venue ID")
    ),
    request_body = UpdateVenue,
    responses(
        (status = 200, description = "Venue updated successfully", body = VenueResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Venues"
)]
async fn update_venue<R: VenueRepository>(
    AdminClaims(_claims): AdminClaims,
    State(service): State<VenueService<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateVenue>,
) -> Result<Json<VenueResponse>, AppError> {
    let venue = service.update_venue(id, input).await?;
    Ok(Json(VenueResponse::from(venue)))
}

/// Delete a venue
#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Venue ID")
    ),
    responses(
        (status = 204, description = "Venue deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Venues"
)]
async fn delete_venue<R: VenueRepository>(
    AdminClaims(_claims): AdminClaims,
    State(service): State<VenueService<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    service.delete_venue(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
