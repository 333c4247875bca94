//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventAttendee, EventFilter};
use crate::repository::EventRepository;

/// MongoDB implementation of the EventRepository
///
/// Events live in `events`, registrations in `event_attendees`.
pub struct MongoEventRepository {
    events: Collection<Event>,
    attendees: Collection<EventAttendee>,
}

impl MongoEventRepository {
    /// Create a new MongoEventRepository backed by the default collections
    pub fn new(db: Database) -> Self {
        Self {
            events: db.collection::<Event>("events"),
            attendees: db.collection::<EventAttendee>("event_attendees"),
        }
    }

    /// Get the underlying events collection for advanced operations
    pub fn collection(&self) -> &Collection<Event> {
        &self.events
    }

    /// Create the indexes backing listing, range filters and attendee lookups
    pub async fn ensure_indexes(&self) -> EventResult<()> {
        let event_indexes = vec![
            IndexModel::builder().keys(doc! { "title": 1 }).build(),
            IndexModel::builder().keys(doc! { "start_date": 1 }).build(),
        ];
        self.events.create_indexes(event_indexes).await?;

        let attendee_indexes = vec![IndexModel::builder().keys(doc! { "event_id": 1 }).build()];
        self.attendees.create_indexes(attendee_indexes).await?;

        Ok(())
    }

    /// Build a MongoDB filter document from an EventFilter
    fn build_filter(filter: &EventFilter) -> Document {
        let mut doc = Document::new();

        if let Some(status) = filter.status {
            doc.insert("status", status.to_string());
        }

        if let Some(category_id) = filter.category_id {
            doc.insert("category_id", to_bson(&category_id).unwrap_or(Bson::Null));
        }

        if let Some(venue_id) = filter.venue_id {
            doc.insert("venue_id", to_bson(&venue_id).unwrap_or(Bson::Null));
        }

        if let Some(organizer_id) = filter.organizer_id {
            doc.insert("organizer.id", to_bson(&organizer_id).unwrap_or(Bson::Null));
        }

        // Range on the start date; both bounds share one sub-document
        let mut date_range = Document::new();
        if let Some(min_date) = filter.min_date {
            date_range.insert("$gte", to_bson(&min_date).unwrap_or(Bson::Null));
        }
        if let Some(max_date) = filter.max_date {
            date_range.insert("$lte", to_bson(&max_date).unwrap_or(Bson::Null));
        }
        if !date_range.is_empty() {
            doc.insert("start_date", date_range);
        }

        if let Some(is_free) = filter.is_free {
            if is_free {
                doc.insert("price", 0.0);
            } else {
                doc.insert("price", doc! { "$gt": 0.0 });
            }
        }

        if let Some(ref search) = filter.search {
            let regex = format!("(?i){}", regex::escape(search));
            doc.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": &regex } },
                    doc! { "description": { "$regex": &regex } },
                ],
            );
        }

        doc
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn create(&self, event: Event) -> EventResult<Event> {
        self.events.insert_one(&event).await?;
        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let event = self.events.find_one(filter).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        use futures_util::TryStreamExt;

        let query = Self::build_filter(&filter);
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "start_date": 1 })
            .skip(filter.offset)
            .limit(filter.limit)
            .build();

        let cursor = self.events.find(query).with_options(options).await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: EventFilter) -> EventResult<u64> {
        let query = Self::build_filter(&filter);
        let count = self.events.count_documents(query).await?;
        Ok(count)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: Event) -> EventResult<Event> {
        let filter = doc! { "_id": to_bson(&event.id).unwrap_or(Bson::Null) };
        let result = self.events.replace_one(filter, &event).await?;

        if result.matched_count == 0 {
            return Err(EventError::NotFound(event.id));
        }

        tracing::info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.events.delete_one(filter).await?;

        if result.deleted_count > 0 {
            // Registrations for a deleted event are dead weight; drop them too
            self.attendees
                .delete_many(doc! { "event_id": to_bson(&id).unwrap_or(Bson::Null) })
                .await?;
            tracing::info!(event_id = %id, "Event deleted");
            return Ok(true);
        }

        Ok(false)
    }

    #[instrument(skip(self))]
    async fn find_attendee(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> EventResult<Option<EventAttendee>> {
        let filter = doc! {
            "event_id": to_bson(&event_id).unwrap_or(Bson::Null),
            "user_id": to_bson(&user_id).unwrap_or(Bson::Null),
        };
        let attendee = self.attendees.find_one(filter).await?;
        Ok(attendee)
    }

    #[instrument(skip(self, attendee), fields(event_id = %attendee.event_id, user_id = %attendee.user_id))]
    async fn add_attendee(&self, attendee: EventAttendee) -> EventResult<EventAttendee> {
        self.attendees.insert_one(&attendee).await?;
        tracing::info!(event_id = %attendee.event_id, user_id = %attendee.user_id, "Attendee registered");
        Ok(attendee)
    }

    #[instrument(skip(self))]
    async fn remove_attendee(&self, event_id: Uuid, user_id: Uuid) -> EventResult<bool> {
        let filter = doc! {
            "event_id": to_bson(&event_id).unwrap_or(Bson::Null),
            "user_id": to_bson(&user_id).unwrap_or(Bson::Null),
        };
        let result = self.attendees.delete_one(filter).await?;

        if result.deleted_count > 0 {
            tracing::info!(event_id = %event_id, user_id = %user_id, "Attendee unregistered");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn list_attendees(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: u64,
    ) -> EventResult<Vec<EventAttendee>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "event_id": to_bson(&event_id).unwrap_or(Bson::Null) };
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "registered_at": -1 })
            .skip(offset)
            .limit(limit)
            .build();

        let cursor = self.attendees.find(filter).with_options(options).await?;
        let attendees: Vec<EventAttendee> = cursor.try_collect().await?;
        Ok(attendees)
    }

    #[instrument(skip(self))]
    async fn count_attendees(&self, event_id: Uuid) -> EventResult<u64> {
        let filter = doc! { "event_id": to_bson(&event_id).unwrap_or(Bson::Null) };
        let count = self.attendees.count_documents(filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn adjust_attendees_count(&self, event_id: Uuid, delta: i64) -> EventResult<()> {
        let filter = doc! { "_id": to_bson(&event_id).unwrap_or(Bson::Null) };
        self.events
            .update_one(filter, doc! { "$inc": { "attendees_count": delta } })
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_attending(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: u64,
    ) -> EventResult<Vec<Event>> {
        use futures_util::TryStreamExt;

        // Page over the registrations, newest first
        let filter = doc! { "user_id": to_bson(&user_id).unwrap_or(Bson::Null) };
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "registered_at": -1 })
            .skip(offset)
            .limit(limit)
            .build();

        let cursor = self.attendees.find(filter).with_options(options).await?;
        let attendees: Vec<EventAttendee> = cursor.try_collect().await?;

        if attendees.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Bson> = attendees
            .iter()
            .map(|a| to_bson(&a.event_id).unwrap_or(Bson::Null))
            .collect();

        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "start_date": 1 })
            .build();
        let cursor = self
            .events
            .find(doc! { "_id": { "$in": ids } })
            .with_options(options)
            .await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn count_attending(&self, user_id: Uuid) -> EventResult<u64> {
        let filter = doc! { "user_id": to_bson(&user_id).unwrap_or(Bson::Null) };
        let count = self.attendees.count_documents(filter).await?;
        Ok(count)
    }
}
