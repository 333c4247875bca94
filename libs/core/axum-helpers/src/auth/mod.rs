//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless JWT token creation and verification (HS256)
//! - Role-gate extractors that verify the bearer token per request
//!
//! # Example
//!
//! ```ignore
//! use axum::{Extension, Router, routing::get};
//! use axum_helpers::auth::{AdminClaims, JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//!
//! // Load config and create the shared auth instance
//! let config = JwtConfig::from_env()?;
//! let jwt_auth = JwtAuth::new(&config);
//!
//! // Gate a handler on the admin role
//! async fn admin_handler(AdminClaims(claims): AdminClaims) { /* ... */ }
//!
//! // Install the auth instance once; extractors pick it up per request
//! let app: Router = Router::new()
//!     .route("/admin", get(admin_handler))
//!     .layer(Extension(jwt_auth));
//! ```

pub mod claims;
pub mod config;
pub mod jwt;

// Re-export commonly used types
pub use claims::{AdminClaims, AuthClaims, OrganizerClaims};
pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, ROLE_ADMIN, ROLE_ORGANIZER};
