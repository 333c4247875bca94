//! Users Domain
//!
//! This module provides a complete domain implementation for accounts and
//! authentication using MongoDB.
//!
//! # Features
//!
//! - Registration and login with Argon2 password hashing
//! - Stateless JWT access tokens
//! - Role-based access control (user, organizer, admin)
//! - Profile management and admin user administration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/auth/*, /users/*)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     auth_handlers::{auth_router, AuthState},
//!     handlers,
//!     mongodb::MongoUserRepository,
//!     service::UserService,
//! };
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! // Create a repository and service
//! let repository = MongoUserRepository::new(db);
//! let service = UserService::new(repository);
//! let jwt_auth = JwtAuth::new(&JwtConfig::new("change-me-to-a-real-32-char-secret!"));
//!
//! // Create Axum routers
//! let auth = auth_router(AuthState::new(service.clone(), jwt_auth));
//! let users = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::{auth_router, AuthState};
pub use error::{UserError, UserResult};
pub use models::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, Role, TokenResponse,
    UpdateUser, User, UserFilter, UserListResponse, UserPublic, UserResponse,
};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
