//! Repository trait for venue data access

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::VenueResult;
use crate::models::{NearQuery, Venue, VenueFilter};

/// Repository trait for venue data access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Insert a new venue
    async fn create(&self, venue: Venue) -> VenueResult<Venue>;

    /// Get a venue by ID
    async fn get_by_id(&self, id: Uuid) -> VenueResult<Option<Venue>>;

    /// List venues matching the filter
    async fn list(&self, filter: VenueFilter) -> VenueResult<Vec<Venue>>;

    /// Count venues matching the filter
    async fn count(&self, filter: VenueFilter) -> VenueResult<u64>;

    /// Find venues near a point, ordered by distance
    async fn find_near(&self, query: NearQuery) -> VenueResult<Vec<Venue>>;

    /// Replace an existing venue
    async fn update(&self, venue: Venue) -> VenueResult<Venue>;

    /// Delete a venue, returning whether it existed
    async fn delete(&self, id: Uuid) -> VenueResult<bool>;
}
