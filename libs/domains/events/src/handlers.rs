//! HTTP handlers for the Events API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AppError, AuthClaims, OrganizerClaims, UuidPath, ValidatedJson,
};
use utoipa::OpenApi;

use crate::models::{
    AttendeeFilter, AttendeeListResponse, AttendeeResponse, CategorySummary, CreateEvent,
    EventFilter, EventListResponse, EventResponse, EventStatus, UpdateEvent, UserSummary,
    VenueSummary,
};
use crate::repository::EventRepository;
use crate::service::EventService;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_event,
        list_events,
        get_event,
        update_event,
        delete_event,
        publish_event,
        cancel_event,
        register_for_event,
        unregister_from_event,
        list_event_attendees
    ),
    components(
        schemas(
            EventResponse,
            CreateEvent,
            UpdateEvent,
            EventListResponse,
            EventStatus,
            UserSummary,
            VenueSummary,
            CategorySummary,
            AttendeeResponse,
            AttendeeListResponse
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
        (name = "Events", description = "Event management and registration endpoints")
    )
)]
pub struct ApiDoc;

/// Create the events router with all routes
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/{id}/publish", post(publish_event))
        .route("/{id}/cancel", post(cancel_event))
        .route(
            "/{id}/register",
            post(register_for_event).delete(unregister_from_event),
        )
        .route("/{id}/attendees", get(list_event_attendees))
        .with_state(service)
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, description = "Referenced venue or category does not exist"),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn create_event<R: EventRepository>(
    OrganizerClaims(claims): OrganizerClaims,
    State(service): State<EventService<R>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let event = service.create_event(claims.user_id()?, input).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// List events with optional filters
#[utoipa::path(
    get,
    path = "",
    params(EventFilter),
    responses(
        (status = 200, description = "Paginated list of events", body = EventListResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Events"
)]
async fn list_events<R: EventRepository>(
    State(service): State<EventService<R>>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<EventListResponse>, AppError> {
    let page = service.list_events(filter).await?;
    Ok(Json(page))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "Events"
)]
async fn get_event<R: EventRepository>(
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<EventResponse>, AppError> {
    let event = service.get_event(id).await?;
    Ok(Json(EventResponse::from(event)))
}

/// Update an event (organizer of the event or admin)
#[utoipa::path(
    put,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn update_event<R: EventRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let event = service
        .update_event(id, claims.user_id()?, claims.is_admin(), input)
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// Delete an event (organizer of the event or admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn delete_event<R: EventRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    service
        .delete_event(id, claims.user_id()?, claims.is_admin())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Publish a draft event
#[utoipa::path(
    post,
    path = "/{id}/publish",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event published", body = EventResponse),
        (status = 400, description = "Event is not in draft status"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn publish_event<R: EventRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<EventResponse>, AppError> {
    let event = service
        .publish_event(id, claims.user_id()?, claims.is_admin())
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// Cancel a draft or published event
#[utoipa::path(
    post,
    path = "/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event canceled", body = EventResponse),
        (status = 400, description = "Event cannot be canceled from its current status"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn cancel_event<R: EventRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<EventResponse>, AppError> {
    let event = service
        .cancel_event(id, claims.user_id()?, claims.is_admin())
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// Register the current user for an event
#[utoipa::path(
    post,
    path = "/{id}/register",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 201, description = "Registered for the event", body = AttendeeResponse),
        (status = 400, description = "Event not published, already registered, or at capacity"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn register_for_event<R: EventRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
) -> Result<(StatusCode, Json<AttendeeResponse>), AppError> {
    let attendee = service.register_attendee(id, claims.user_id()?).await?;
    Ok((StatusCode::CREATED, Json(AttendeeResponse::from(attendee))))
}

/// Remove the current user's registration
#[utoipa::path(
    delete,
    path = "/{id}/register",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Registration removed"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, description = "Event or registration not found"),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn unregister_from_event<R: EventRepository>(
    AuthClaims(claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    service.unregister_attendee(id, claims.user_id()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List attendees of an event
#[utoipa::path(
    get,
    path = "/{id}/attendees",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        AttendeeFilter
    ),
    responses(
        (status = 200, description = "Paginated list of attendees", body = AttendeeListResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
async fn list_event_attendees<R: EventRepository>(
    AuthClaims(_claims): AuthClaims,
    State(service): State<EventService<R>>,
    UuidPath(id): UuidPath,
    Query(filter): Query<AttendeeFilter>,
) -> Result<Json<AttendeeListResponse>, AppError> {
    let page = service.list_attendees(id, filter).await?;
    Ok(Json(page))
}
