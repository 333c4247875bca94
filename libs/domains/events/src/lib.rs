//! # Events Domain
//!
//! Event management for the events platform: CRUD, the publish/cancel
//! lifecycle, and attendee registration.
//!
//! ## Features
//!
//! - Organizer-owned events with denormalized organizer/venue/category
//!   summaries resolved through [`lookup`] ports
//! - Lifecycle transitions: draft -> published -> canceled
//! - Registration with duplicate and capacity checks, keeping a denormalized
//!   `attendees_count` in step
//! - Filtered listing: status, references, date range, free/paid, text search
//!
//! ## Architecture
//!
//! ```text
//! handlers -> service -> repository (trait) -> mongodb
//!                '-> lookup ports (users, venues, categories)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_events::{EventService, MongoEventRepository};
//! # use domain_events::lookup::{CategoryLookup, UserLookup, VenueLookup};
//!
//! # async fn example(
//! #     db: mongodb::Database,
//! #     users: Arc<dyn UserLookup>,
//! #     venues: Arc<dyn VenueLookup>,
//! #     categories: Arc<dyn CategoryLookup>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoEventRepository::new(db);
//! repository.ensure_indexes().await?;
//!
//! let service = EventService::new(repository, users, venues, categories);
//! let app = domain_events::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EventError, EventResult};
pub use handlers::{router, ApiDoc};
pub use lookup::{CategoryLookup, UserLookup, VenueLookup};
pub use models::{
    AttendeeFilter, AttendeeListResponse, AttendeeResponse, CategorySummary, CreateEvent, Event,
    EventAttendee, EventFilter, EventListResponse, EventResponse, EventStatus, UpdateEvent,
    UserSummary, VenueSummary,
};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
