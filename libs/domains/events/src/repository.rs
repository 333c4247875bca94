use crate::error::EventResult;
use crate::models::{Event, EventAttendee, EventFilter};
use async_trait::async_trait;
use uuid::Uuid;

/// Repository trait for event and registration storage
///
/// Events and attendee records form one aggregate; the MongoDB
/// implementation keeps them in two collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event
    async fn create(&self, event: Event) -> EventResult<Event>;

    /// Get an event by its ID
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// List events matching the filter, sorted by start date
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>>;

    /// Count events matching the filter
    async fn count(&self, filter: EventFilter) -> EventResult<u64>;

    /// Replace an existing event
    async fn update(&self, event: Event) -> EventResult<Event>;

    /// Delete an event, returning whether it existed
    async fn delete(&self, id: Uuid) -> EventResult<bool>;

    /// Find a registration for (event, user)
    async fn find_attendee(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> EventResult<Option<EventAttendee>>;

    /// Store a registration record
    async fn add_attendee(&self, attendee: EventAttendee) -> EventResult<EventAttendee>;

    /// Remove a registration, returning whether it existed
    async fn remove_attendee(&self, event_id: Uuid, user_id: Uuid) -> EventResult<bool>;

    /// List registrations for an event, most recent first
    async fn list_attendees(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: u64,
    ) -> EventResult<Vec<EventAttendee>>;

    /// Count registrations for an event
    async fn count_attendees(&self, event_id: Uuid) -> EventResult<u64>;

    /// Adjust the denormalized attendee counter on an event
    async fn adjust_attendees_count(&self, event_id: Uuid, delta: i64) -> EventResult<()>;

    /// List events a user is registered for
    async fn list_attending(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: u64,
    ) -> EventResult<Vec<Event>>;

    /// Count events a user is registered for
    async fn count_attending(&self, user_id: Uuid) -> EventResult<u64>;
}
