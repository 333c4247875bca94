//! Cross-domain lookup adapters.
//!
//! The events and reviews domains declare lookup ports for the neighboring
//! data they embed (organizer, venue, category, review author) or validate
//! against (the reviewed event). This module implements those ports on top
//! of the other domains' services so each domain crate stays decoupled.
//!
//! A missing record maps to `None`/`false` so the owning domain can raise
//! its own not-found error; any other failure surfaces as a database error.

use async_trait::async_trait;
use uuid::Uuid;

use domain_categories::{CategoryError, CategoryRepository, CategoryService};
use domain_events::{
    CategoryLookup, CategorySummary, EventError, EventRepository, EventResult, EventService,
    UserLookup, UserSummary, VenueLookup, VenueSummary,
};
use domain_reviews::{AuthorLookup, EventLookup, ReviewAuthor, ReviewError, ReviewResult};
use domain_users::{UserError, UserRepository, UserService};
use domain_venues::{VenueError, VenueRepository, VenueService};

/// Resolves user summaries for events and review authors for reviews.
pub struct UserDirectory<R: UserRepository> {
    service: UserService<R>,
}

impl<R: UserRepository> UserDirectory<R> {
    pub fn new(service: UserService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserLookup for UserDirectory<R> {
    async fn user_summary(&self, id: Uuid) -> EventResult<Option<UserSummary>> {
        match self.service.get_user(id).await {
            Ok(user) => Ok(Some(UserSummary {
                id: user.id,
                username: user.username,
                full_name: user.full_name,
            })),
            Err(UserError::NotFound(_)) => Ok(None),
            Err(err) => Err(EventError::Database(err.to_string())),
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> AuthorLookup for UserDirectory<R> {
    async fn author_summary(&self, id: Uuid) -> ReviewResult<Option<ReviewAuthor>> {
        match self.service.get_user(id).await {
            Ok(user) => Ok(Some(ReviewAuthor {
                id: user.id,
                username: user.username,
                full_name: user.full_name,
            })),
            Err(UserError::NotFound(_)) => Ok(None),
            Err(err) => Err(ReviewError::Database(err.to_string())),
        }
    }
}

/// Resolves venue summaries embedded into events.
pub struct VenueDirectory<R: VenueRepository> {
    service: VenueService<R>,
}

impl<R: VenueRepository> VenueDirectory<R> {
    pub fn new(service: VenueService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: VenueRepository + 'static> VenueLookup for VenueDirectory<R> {
    async fn venue_summary(&self, id: Uuid) -> EventResult<Option<VenueSummary>> {
        match self.service.get_venue(id).await {
            Ok(venue) => Ok(Some(VenueSummary {
                id: venue.id,
                name: venue.name,
                address: venue.address,
                city: venue.city,
            })),
            Err(VenueError::NotFound(_)) => Ok(None),
            Err(err) => Err(EventError::Database(err.to_string())),
        }
    }
}

/// Resolves category summaries embedded into events.
pub struct CategoryDirectory<R: CategoryRepository> {
    service: CategoryService<R>,
}

impl<R: CategoryRepository> CategoryDirectory<R> {
    pub fn new(service: CategoryService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: CategoryRepository + 'static> CategoryLookup for CategoryDirectory<R> {
    async fn category_summary(&self, id: Uuid) -> EventResult<Option<CategorySummary>> {
        match self.service.get_category(id).await {
            Ok(category) => Ok(Some(CategorySummary {
                id: category.id,
                name: category.name,
            })),
            Err(CategoryError::NotFound(_)) => Ok(None),
            Err(err) => Err(EventError::Database(err.to_string())),
        }
    }
}

/// Tells the reviews domain whether a reviewed event exists.
pub struct EventDirectory<R: EventRepository> {
    service: EventService<R>,
}

impl<R: EventRepository> EventDirectory<R> {
    pub fn new(service: EventService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: EventRepository + 'static> EventLookup for EventDirectory<R> {
    async fn event_exists(&self, id: Uuid) -> ReviewResult<bool> {
        match self.service.get_event(id).await {
            Ok(_) => Ok(true),
            Err(EventError::NotFound(_)) => Ok(false),
            Err(err) => Err(ReviewError::Database(err.to_string())),
        }
    }
}
