//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: Stateless JWT issuance and role-gate extractors
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

// Domain modules
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    AdminClaims, AuthClaims, JwtAuth, JwtClaims, JwtConfig, OrganizerClaims, ROLE_ADMIN,
    ROLE_ORGANIZER,
};

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
