//! Venue Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{VenueError, VenueResult};
use crate::models::{CreateVenue, NearQuery, UpdateVenue, Venue, VenueFilter, VenueListResponse, VenueResponse};
use crate::repository::VenueRepository;

const MAX_LIMIT: i64 = 100;

/// Venue service providing CRUD and geo search on top of the repository
pub struct VenueService<R: VenueRepository> {
    repository: Arc<R>,
}

impl<R: VenueRepository> VenueService<R> {
    /// Create a new VenueService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new venue
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_venue(&self, input: CreateVenue) -> VenueResult<Venue> {
        let venue = Venue::new(input);
        self.repository.create(venue).await
    }

    /// Get a venue by ID
    #[instrument(skip(self))]
    pub async fn get_venue(&self, id: Uuid) -> VenueResult<Venue> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(VenueError::NotFound(id))
    }

    /// List venues with filters and a paginated envelope
    #[instrument(skip(self))]
    pub async fn list_venues(&self, filter: VenueFilter) -> VenueResult<VenueListResponse> {
        let filter = VenueFilter {
            limit: filter.limit.clamp(1, MAX_LIMIT),
            ..filter
        };

        let total = self.repository.count(filter.clone()).await?;
        let venues = self.repository.list(filter.clone()).await?;

        Ok(VenueListResponse {
            total,
            limit: filter.limit,
            offset: filter.offset,
            items: venues.into_iter().map(Into::into).collect(),
        })
    }

    /// Find venues near a point, ordered by distance
    #[instrument(skip(self))]
    pub async fn find_nearby(&self, query: NearQuery) -> VenueResult<Vec<VenueResponse>> {
        let query = NearQuery {
            limit: query.limit.clamp(1, MAX_LIMIT),
            ..query
        };

        let venues = self.repository.find_near(query).await?;
        Ok(venues.into_iter().map(Into::into).collect())
    }

    /// Update a venue
    #[instrument(skip(self, input))]
    pub async fn update_venue(&self, id: Uuid, input: UpdateVenue) -> VenueResult<Venue> {
        let mut venue = self.get_venue(id).await?;
        venue.apply_update(input);
        self.repository.update(venue).await
    }

    /// Delete a venue
    #[instrument(skip(self))]
    pub async fn delete_venue(&self, id: Uuid) -> VenueResult<()> {
        if !self.repository.delete(id).await? {
            return Err(VenueError::NotFound(id));
        }
        Ok(())
    }
}

// Manual Clone implementation to avoid requiring R: Clone
impl<R: VenueRepository> Clone for VenueService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
