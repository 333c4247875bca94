//! Categories Domain
//!
//! This module provides a complete domain implementation for event categories
//! using MongoDB. Categories are a small reference entity: a unique name, an
//! optional description, and timestamps.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{
//!     handlers,
//!     mongodb::MongoCategoryRepository,
//!     service::CategoryService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoCategoryRepository::new(db);
//! let service = CategoryService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CategoryError, CategoryResult};
pub use handlers::{router, ApiDoc};
pub use models::{
    Category, CategoryFilter, CategoryListResponse, CategoryResponse, CreateCategory,
    UpdateCategory,
};
pub use mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
