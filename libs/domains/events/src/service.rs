//! Event Service - Business logic layer
//!
//! Owns the lifecycle rules (publish/cancel), the ownership checks, and the
//! registration invariants (published only, no duplicates, capacity).

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::lookup::{CategoryLookup, UserLookup, VenueLookup};
use crate::models::{
    AttendeeFilter, AttendeeListResponse, CreateEvent, Event, EventAttendee, EventFilter,
    EventListResponse, EventStatus, UpdateEvent,
};
use crate::repository::EventRepository;

const MAX_LIMIT: i64 = 100;

/// Event service coordinating the repository and the summary lookups
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserLookup>,
    venues: Arc<dyn VenueLookup>,
    categories: Arc<dyn CategoryLookup>,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new EventService with the given repository and lookups
    pub fn new(
        repository: R,
        users: Arc<dyn UserLookup>,
        venues: Arc<dyn VenueLookup>,
        categories: Arc<dyn CategoryLookup>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            venues,
            categories,
        }
    }

    fn ensure_owner(event: &Event, actor_id: Uuid, is_admin: bool) -> EventResult<()> {
        if is_admin || event.is_organized_by(actor_id) {
            Ok(())
        } else {
            Err(EventError::NotOwner)
        }
    }

    /// Create a new event, resolving the embedded summaries
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_event(&self, organizer_id: Uuid, input: CreateEvent) -> EventResult<Event> {
        let organizer = self
            .users
            .user_summary(organizer_id)
            .await?
            .ok_or(EventError::UserNotFound(organizer_id))?;
        let venue = self
            .venues
            .venue_summary(input.venue_id)
            .await?
            .ok_or(EventError::VenueNotFound(input.venue_id))?;
        let category = self
            .categories
            .category_summary(input.category_id)
            .await?
            .ok_or(EventError::CategoryNotFound(input.category_id))?;

        let event = Event::new(input, organizer, venue, category);
        self.repository.create(event).await
    }

    /// Get an event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// List events with filters and a paginated envelope
    #[instrument(skip(self))]
    pub async fn list_events(&self, filter: EventFilter) -> EventResult<EventListResponse> {
        let filter = EventFilter {
            limit: filter.limit.clamp(1, MAX_LIMIT),
            ..filter
        };

        let total = self.repository.count(filter.clone()).await?;
        let events = self.repository.list(filter.clone()).await?;

        Ok(EventListResponse {
            total,
            limit: filter.limit,
            offset: filter.offset,
            items: events.into_iter().map(Into::into).collect(),
        })
    }

    /// Update an event; only the organizer or an admin may do this
    ///
    /// Changing the venue or category reference re-resolves the embedded
    /// summary and fails with 404 when the new reference is unknown.
    #[instrument(skip(self, input))]
    pub async fn update_event(
        &self,
        id: Uuid,
        actor_id: Uuid,
        is_admin: bool,
        input: UpdateEvent,
    ) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;
        Self::ensure_owner(&event, actor_id, is_admin)?;

        let venue_changed = input.venue_id.is_some_and(|v| v != event.venue_id);
        let category_changed = input.category_id.is_some_and(|c| c != event.category_id);

        event.apply_update(input);

        if venue_changed {
            event.venue = self
                .venues
                .venue_summary(event.venue_id)
                .await?
                .ok_or(EventError::VenueNotFound(event.venue_id))?;
        }
        if category_changed {
            event.category = self
                .categories
                .category_summary(event.category_id)
                .await?
                .ok_or(EventError::CategoryNotFound(event.category_id))?;
        }

        self.repository.update(event).await
    }

    /// Delete an event; only the organizer or an admin may do this
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid, actor_id: Uuid, is_admin: bool) -> EventResult<()> {
        let event = self.get_event(id).await?;
        Self::ensure_owner(&event, actor_id, is_admin)?;

        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound(id));
        }
        Ok(())
    }

    /// Move a draft event to published
    #[instrument(skip(self))]
    pub async fn publish_event(
        &self,
        id: Uuid,
        actor_id: Uuid,
        is_admin: bool,
    ) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;
        Self::ensure_owner(&event, actor_id, is_admin)?;

        if event.status != EventStatus::Draft {
            return Err(EventError::PublishNotAllowed);
        }

        event.status = EventStatus::Published;
        event.updated_at = Utc::now();
        self.repository.update(event).await
    }

    /// Cancel a draft or published event
    #[instrument(skip(self))]
    pub async fn cancel_event(
        &self,
        id: Uuid,
        actor_id: Uuid,
        is_admin: bool,
    ) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;
        Self::ensure_owner(&event, actor_id, is_admin)?;

        if !matches!(event.status, EventStatus::Draft | EventStatus::Published) {
            return Err(EventError::CancelNotAllowed);
        }

        event.status = EventStatus::Canceled;
        event.updated_at = Utc::now();
        self.repository.update(event).await
    }

    /// Register a user for a published event
    #[instrument(skip(self))]
    pub async fn register_attendee(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> EventResult<EventAttendee> {
        let event = self.get_event(event_id).await?;

        if event.status != EventStatus::Published {
            return Err(EventError::RegistrationClosed);
        }
        if self
            .repository
            .find_attendee(event_id, user_id)
            .await?
            .is_some()
        {
            return Err(EventError::AlreadyRegistered);
        }
        if let Some(max) = event.max_attendees {
            if event.attendees_count >= i64::from(max) {
                return Err(EventError::CapacityReached);
            }
        }

        let user = self
            .users
            .user_summary(user_id)
            .await?
            .ok_or(EventError::UserNotFound(user_id))?;

        let attendee = self
            .repository
            .add_attendee(EventAttendee::new(event_id, user))
            .await?;
        self.repository.adjust_attendees_count(event_id, 1).await?;
        Ok(attendee)
    }

    /// Remove a user's registration
    #[instrument(skip(self))]
    pub async fn unregister_attendee(&self, event_id: Uuid, user_id: Uuid) -> EventResult<()> {
        self.get_event(event_id).await?;

        if !self.repository.remove_attendee(event_id, user_id).await? {
            return Err(EventError::NotRegistered);
        }
        self.repository.adjust_attendees_count(event_id, -1).await?;
        Ok(())
    }

    /// List registrations for an event, newest first
    #[instrument(skip(self))]
    pub async fn list_attendees(
        &self,
        event_id: Uuid,
        filter: AttendeeFilter,
    ) -> EventResult<AttendeeListResponse> {
        self.get_event(event_id).await?;

        let limit = filter.limit.clamp(1, MAX_LIMIT);
        let total = self.repository.count_attendees(event_id).await?;
        let attendees = self
            .repository
            .list_attendees(event_id, limit, filter.offset)
            .await?;

        Ok(AttendeeListResponse {
            total,
            limit,
            offset: filter.offset,
            items: attendees.into_iter().map(Into::into).collect(),
        })
    }

    /// List events a user is registered for
    #[instrument(skip(self))]
    pub async fn list_attending(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: u64,
    ) -> EventResult<EventListResponse> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let total = self.repository.count_attending(user_id).await?;
        let events = self.repository.list_attending(user_id, limit, offset).await?;

        Ok(EventListResponse {
            total,
            limit,
            offset,
            items: events.into_iter().map(Into::into).collect(),
        })
    }
}

// Manual Clone implementation to avoid requiring R: Clone
impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            users: Arc::clone(&self.users),
            venues: Arc::clone(&self.venues),
            categories: Arc::clone(&self.categories),
        }
    }
}
