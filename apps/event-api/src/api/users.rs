//! Users API routes
//!
//! Wires the users domain to HTTP routes and adds the `/me/events`
//! composition endpoint backed by the events domain.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{AppError, AuthClaims};
use domain_events::{EventFilter, EventListResponse, EventService, MongoEventRepository};
use domain_users::{MongoUserRepository, UserService, handlers};
use serde::Deserialize;
use utoipa::IntoParams;

/// Create the users router
///
/// The domain router serves profile management; `/me/events` is composed
/// here because it reads from the events domain.
pub fn router(
    service: UserService<MongoUserRepository>,
    events: EventService<MongoEventRepository>,
) -> Router {
    handlers::router(service).merge(
        Router::new()
            .route("/me/events", get(my_events))
            .with_state(events),
    )
}

/// Query parameters for listing the current user's events
#[derive(Debug, Deserialize, IntoParams)]
pub struct MyEventsQuery {
    /// true lists events the caller organizes, false events they attend
    #[serde(default)]
    pub as_organizer: bool,
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

/// List events related to the current user
#[utoipa::path(
    get,
    path = "/api/users/me/events",
    params(MyEventsQuery),
    responses(
        (status = 200, description = "Events the user attends or organizes", body = EventListResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn my_events(
    State(events): State<EventService<MongoEventRepository>>,
    AuthClaims(claims): AuthClaims,
    Query(query): Query<MyEventsQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let user_id = claims.user_id()?;

    let response = if query.as_organizer {
        let filter = EventFilter {
            organizer_id: Some(user_id),
            limit: query.limit,
            offset: query.offset,
            ..EventFilter::default()
        };
        events.list_events(filter).await?
    } else {
        events
            .list_attending(user_id, query.limit, query.offset)
            .await?
    };

    Ok(Json(response))
}
