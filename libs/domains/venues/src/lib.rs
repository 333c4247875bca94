//! # Venues Domain
//!
//! Venue management for the events platform, including geospatial search.
//!
//! ## Features
//!
//! - CRUD operations for venues (create/update/delete are admin-only)
//! - Filtered listing by city, country, minimum capacity, and free-text search
//! - `GET /near` geospatial lookup backed by a MongoDB 2dsphere index,
//!   returning venues ordered by distance from a point
//!
//! ## Architecture
//!
//! ```text
//! handlers -> service -> repository (trait) -> mongodb
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domain_venues::{MongoVenueRepository, VenueService};
//!
//! # async fn example(db: mongodb::Database) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoVenueRepository::new(db);
//! repository.ensure_indexes().await?;
//!
//! let service = VenueService::new(repository);
//! let app = domain_venues::handlers::router(service);
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
pub use error::{VenueError, VenueResult};
pub use handlers::{router, ApiDoc};
pub use models::{
    CreateVenue, GeoPoint, NearQuery, UpdateVenue, Venue, VenueFilter, VenueListResponse,
    VenueResponse,
};
pub use mongodb::MongoVenueRepository;
pub use repository::VenueRepository;
pub use service::VenueService;
