//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - MongoDB client
//! - JWT authentication helper

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones), providing access to:
/// - Application configuration
/// - MongoDB client and database
/// - JWT signing/verification
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// JWT helper used by the auth routes and the claims extractors
    pub jwt_auth: JwtAuth,
}
