//! API routes module
//!
//! This module defines all HTTP API routes for the event platform API.

pub mod events;
pub mod health;
pub mod lookups;
pub mod users;

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tracing::info;

use domain_categories::{CategoryService, MongoCategoryRepository, handlers as category_handlers};
use domain_events::{EventService, MongoEventRepository};
use domain_reviews::{MongoReviewRepository, ReviewService, handlers as review_handlers};
use domain_users::{AuthState, MongoUserRepository, UserService, auth_router};
use domain_venues::{MongoVenueRepository, VenueService, handlers as venue_handlers};

use crate::state::AppState;
use lookups::{CategoryDirectory, EventDirectory, UserDirectory, VenueDirectory};

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    // Services are built once and shared: events embeds user/venue/category
    // summaries and reviews validates events, all through the lookup adapters.
    let user_service = UserService::new(MongoUserRepository::new(state.db.clone()));
    let venue_service = VenueService::new(MongoVenueRepository::new(state.db.clone()));
    let category_service = CategoryService::new(MongoCategoryRepository::new(state.db.clone()));

    let event_service = EventService::new(
        MongoEventRepository::new(state.db.clone()),
        Arc::new(UserDirectory::new(user_service.clone())),
        Arc::new(VenueDirectory::new(venue_service.clone())),
        Arc::new(CategoryDirectory::new(category_service.clone())),
    );

    let review_service = ReviewService::new(
        MongoReviewRepository::new(state.db.clone()),
        Arc::new(EventDirectory::new(event_service.clone())),
        Arc::new(UserDirectory::new(user_service.clone())),
    );

    Router::new()
        .nest(
            "/auth",
            auth_router(AuthState::new(
                user_service.clone(),
                state.jwt_auth.clone(),
            )),
        )
        .nest("/users", users::router(user_service, event_service.clone()))
        .nest("/events", events::router(event_service, review_service.clone()))
        .nest("/venues", venue_handlers::router(venue_service))
        .nest("/categories", category_handlers::router(category_service))
        .nest("/reviews", review_handlers::router(review_service))
        // The claims extractors read the JwtAuth instance from this extension
        .layer(Extension(state.jwt_auth.clone()))
}

/// Create the readiness router with application state.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /health/ready endpoint pings MongoDB.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/health/ready", get(health::ready_handler))
        .with_state(state)
}

/// Ensure MongoDB indexes for every collection
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    MongoVenueRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create venue indexes: {}", e))?;
    MongoCategoryRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create category indexes: {}", e))?;
    MongoEventRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    MongoReviewRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create review indexes: {}", e))?;

    info!("MongoDB collection indexes created");
    Ok(())
}
