use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of an event
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventStatus {
    /// Not yet visible; registration closed
    #[default]
    Draft,
    /// Open for registration
    Published,
    /// Called off by the organizer
    Canceled,
    /// Took place in the past
    Completed,
}

/// User display data embedded into events and attendee records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
}

/// Venue display data embedded into events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VenueSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
}

/// Category display data embedded into events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
}

/// Event entity - represents an event stored in MongoDB
///
/// Organizer, venue and category are denormalized display summaries resolved
/// at write time; `venue_id`/`category_id` keep the raw references for
/// filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Scheduled start, also the listing sort key
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub category_id: Uuid,
    pub venue_id: Uuid,
    /// Registration cap; unlimited when absent
    pub max_attendees: Option<i32>,
    /// Ticket price; 0 means free
    pub price: f64,
    #[serde(default)]
    pub is_private: bool,
    pub status: EventStatus,
    pub organizer: UserSummary,
    pub venue: VenueSummary,
    pub category: CategorySummary,
    /// Kept in step with the attendee records by the service
    pub attendees_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub category_id: Uuid,
    pub venue_id: Uuid,
    pub max_attendees: Option<i32>,
    pub price: f64,
    pub is_private: bool,
    pub status: EventStatus,
    pub organizer: UserSummary,
    pub venue: VenueSummary,
    pub category: CategorySummary,
    pub attendees_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            category_id: event.category_id,
            venue_id: event.venue_id,
            max_attendees: event.max_attendees,
            price: event.price,
            is_private: event.is_private,
            status: event.status,
            organizer: event.organizer,
            venue: event.venue,
            category: event.category,
            attendees_count: event.attendees_count,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// DTO for creating a new event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub category_id: Uuid,
    pub venue_id: Uuid,
    #[validate(range(min = 1))]
    pub max_attendees: Option<i32>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_private: bool,
    /// Initial status; defaults to draft
    #[serde(default)]
    pub status: EventStatus,
}

/// DTO for updating an event
///
/// Status is deliberately absent; transitions go through the publish and
/// cancel operations.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub venue_id: Option<Uuid>,
    #[validate(range(min = 1))]
    pub max_attendees: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub is_private: Option<bool>,
}

/// Paginated event list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub total: u64,
    pub limit: i64,
    pub offset: u64,
    pub items: Vec<EventResponse>,
}

/// Query parameters for listing events
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    /// Filter by lifecycle status
    pub status: Option<EventStatus>,
    /// Filter by category reference
    pub category_id: Option<Uuid>,
    /// Filter by venue reference
    pub venue_id: Option<Uuid>,
    /// Filter by organizer
    pub organizer_id: Option<Uuid>,
    /// Keep events starting at or after this instant
    pub min_date: Option<DateTime<Utc>>,
    /// Keep events starting at or before this instant
    pub max_date: Option<DateTime<Utc>>,
    /// true keeps free events, false keeps paid ones
    pub is_free: Option<bool>,
    /// Case-insensitive match over title and description
    pub search: Option<String>,
    /// Maximum number of results (default: 10)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    10
}

/// Registration record linking a user to an event
///
/// Username and full name are denormalized so the attendee list renders
/// without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttendee {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl EventAttendee {
    /// Create a registration record for the given user on the given event
    pub fn new(event_id: Uuid, user: UserSummary) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_id,
            user_id: user.id,
            username: user.username,
            full_name: user.full_name,
            registered_at: Utc::now(),
        }
    }
}

/// Attendee returned by the API; `id` is the attending user's id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendeeResponse {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl From<EventAttendee> for AttendeeResponse {
    fn from(attendee: EventAttendee) -> Self {
        Self {
            id: attendee.user_id,
            username: attendee.username,
            full_name: attendee.full_name,
            registered_at: attendee.registered_at,
        }
    }
}

/// Query parameters for listing attendees
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct AttendeeFilter {
    /// Maximum number of results (default: 10)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

/// Paginated attendee list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendeeListResponse {
    pub total: u64,
    pub limit: i64,
    pub offset: u64,
    pub items: Vec<AttendeeResponse>,
}

impl Event {
    /// Create a new event from validated input and resolved summaries
    pub fn new(
        input: CreateEvent,
        organizer: UserSummary,
        venue: VenueSummary,
        category: CategorySummary,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            category_id: input.category_id,
            venue_id: input.venue_id,
            max_attendees: input.max_attendees,
            price: input.price,
            is_private: input.is_private,
            status: input.status,
            organizer,
            venue,
            category,
            attendees_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply scalar updates; embedded summaries are re-resolved by the
    /// service when the references change
    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(venue_id) = update.venue_id {
            self.venue_id = venue_id;
        }
        if let Some(max_attendees) = update.max_attendees {
            self.max_attendees = Some(max_attendees);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(is_private) = update.is_private {
            self.is_private = is_private;
        }
        self.updated_at = Utc::now();
    }

    /// Whether the given user is this event's organizer
    pub fn is_organized_by(&self, user_id: Uuid) -> bool {
        self.organizer.id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> (UserSummary, VenueSummary, CategorySummary) {
        (
            UserSummary {
                id: Uuid::now_v7(),
                username: "organizer".to_string(),
                full_name: Some("Olga Organizer".to_string()),
            },
            VenueSummary {
                id: Uuid::now_v7(),
                name: "Riverside Hall".to_string(),
                address: "Quay 7".to_string(),
                city: "Lisbon".to_string(),
            },
            CategorySummary {
                id: Uuid::now_v7(),
                name: "Music".to_string(),
            },
        )
    }

    fn create_input() -> CreateEvent {
        CreateEvent {
            title: "Summer Concert".to_string(),
            description: "Open air concert".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            category_id: Uuid::now_v7(),
            venue_id: Uuid::now_v7(),
            max_attendees: Some(100),
            price: 0.0,
            is_private: false,
            status: EventStatus::default(),
        }
    }

    #[test]
    fn test_new_event_defaults() {
        let (organizer, venue, category) = summaries();
        let event = Event::new(create_input(), organizer.clone(), venue, category);

        assert_eq!(event.status, EventStatus::Draft);
        assert_eq!(event.attendees_count, 0);
        assert_eq!(event.price, 0.0);
        assert_eq!(event.organizer, organizer);
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_event_serializes_id_as_underscore_id() {
        let (organizer, venue, category) = summaries();
        let event = Event::new(create_input(), organizer, venue, category);

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());
        assert_eq!(json["status"], "draft");
    }

    #[test]
    fn test_apply_update_partial() {
        let (organizer, venue, category) = summaries();
        let mut event = Event::new(create_input(), organizer, venue, category);
        let original_title = event.title.clone();
        let new_venue_id = Uuid::now_v7();

        event.apply_update(UpdateEvent {
            price: Some(25.0),
            venue_id: Some(new_venue_id),
            ..Default::default()
        });

        assert_eq!(event.price, 25.0);
        assert_eq!(event.venue_id, new_venue_id);
        assert_eq!(event.title, original_title);
        assert!(event.updated_at > event.created_at);
    }

    #[test]
    fn test_create_event_status_defaults_to_draft() {
        let input: CreateEvent = serde_json::from_value(serde_json::json!({
            "title": "Summer Concert",
            "description": "Open air concert",
            "start_date": "2026-09-01T18:00:00Z",
            "end_date": "2026-09-01T23:00:00Z",
            "category_id": Uuid::now_v7(),
            "venue_id": Uuid::now_v7()
        }))
        .unwrap();

        assert_eq!(input.status, EventStatus::Draft);
        assert_eq!(input.price, 0.0);
        assert!(!input.is_private);
        assert!(input.max_attendees.is_none());
    }

    #[test]
    fn test_attendee_response_uses_user_id() {
        let user = UserSummary {
            id: Uuid::now_v7(),
            username: "alice".to_string(),
            full_name: None,
        };
        let attendee = EventAttendee::new(Uuid::now_v7(), user.clone());
        assert_ne!(attendee.id, user.id);

        let response = AttendeeResponse::from(attendee);
        assert_eq!(response.id, user.id);
        assert_eq!(response.username, "alice");
    }

    #[test]
    fn test_event_filter_default_limit() {
        let filter: EventFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
        assert!(filter.status.is_none());
    }
}
