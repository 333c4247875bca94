//! MongoDB implementation of VenueRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{VenueError, VenueResult};
use crate::models::{NearQuery, Venue, VenueFilter};
use crate::repository::VenueRepository;

/// MongoDB implementation of the VenueRepository
pub struct MongoVenueRepository {
    collection: Collection<Venue>,
}

impl MongoVenueRepository {
    /// Create a new MongoVenueRepository backed by the `venues` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Venue>("venues");
        Self { collection }
    }

    /// Create a new MongoVenueRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Venue>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Venue> {
        &self.collection
    }

    /// Create the name index and the 2dsphere index behind `find_near`
    pub async fn ensure_indexes(&self) -> VenueResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "name": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "location": "2dsphere" })
                .options(IndexOptions::builder().sparse(true).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Build a MongoDB filter document from VenueFilter
    fn build_filter(filter: &VenueFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref city) = filter.city {
            let regex = format!("(?i){}", regex::escape(city));
            doc.insert("city", doc! { "$regex": regex });
        }

        if let Some(ref country) = filter.country {
            let regex = format!("(?i){}", regex::escape(country));
            doc.insert("country", doc! { "$regex": regex });
        }

        if let Some(min_capacity) = filter.min_capacity {
            doc.insert("capacity", doc! { "$gte": min_capacity });
        }

        if let Some(ref search) = filter.search {
            let regex = format!("(?i){}", regex::escape(search));
            doc.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": &regex } },
                    doc! { "description": { "$regex": &regex } },
                    doc! { "address": { "$regex": &regex } },
                ],
            );
        }

        doc
    }

    /// Build the `$near` geo filter from a NearQuery
    fn near_filter(query: &NearQuery) -> Document {
        doc! {
            "location": {
                "$near": {
                    "$geometry": {
                        "type": "Point",
                        "coordinates": [query.longitude, query.latitude],
                    },
                    "$maxDistance": query.max_distance_m,
                }
            }
        }
    }
}

#[async_trait]
impl VenueRepository for MongoVenueRepository {
    #[instrument(skip(self, venue), fields(name = %venue.name))]
    async fn create(&self, venue: Venue) -> VenueResult<Venue> {
        self.collection.insert_one(&venue).await?;

        tracing::info!(venue_id = %venue.id, "Venue created successfully");
        Ok(venue)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> VenueResult<Option<Venue>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let venue = self.collection.find_one(filter).await?;
        Ok(venue)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: VenueFilter) -> VenueResult<Vec<Venue>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "name": 1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let venues: Vec<Venue> = cursor.try_collect().await?;

        Ok(venues)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: VenueFilter) -> VenueResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_near(&self, query: NearQuery) -> VenueResult<Vec<Venue>> {
        use futures_util::TryStreamExt;

        // $near returns results ordered by distance; no explicit sort allowed
        let options = mongodb::options::FindOptions::builder()
            .limit(query.limit)
            .build();

        let cursor = self
            .collection
            .find(Self::near_filter(&query))
            .with_options(options)
            .await?;
        let venues: Vec<Venue> = cursor.try_collect().await?;

        Ok(venues)
    }

    #[instrument(skip(self, venue), fields(venue_id = %venue.id))]
    async fn update(&self, venue: Venue) -> VenueResult<Venue> {
        let filter = doc! { "_id": to_bson(&venue.id).unwrap_or(Bson::Null) };
        let result = self.collection.replace_one(filter, &venue).await?;

        if result.matched_count == 0 {
            return Err(VenueError::NotFound(venue.id));
        }

        tracing::info!(venue_id = %venue.id, "Venue updated successfully");
        Ok(venue)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> VenueResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(venue_id = %id, "Venue deleted successfully");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let filter = VenueFilter::default();
        let doc = MongoVenueRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_city_is_case_insensitive() {
        let filter = VenueFilter {
            city: Some("lisbon".to_string()),
            ..Default::default()
        };
        let doc = MongoVenueRepository::build_filter(&filter);

        let city = doc.get_document("city").unwrap();
        assert_eq!(city.get_str("$regex").unwrap(), "(?i)lisbon");
    }

    #[test]
    fn test_build_filter_escapes_regex_metacharacters() {
        let filter = VenueFilter {
            search: Some("rock+roll (live)".to_string()),
            ..Default::default()
        };
        let doc = MongoVenueRepository::build_filter(&filter);

        let or = doc.get_array("$or").unwrap();
        let name = or[0].as_document().unwrap().get_document("name").unwrap();
        assert_eq!(
            name.get_str("$regex").unwrap(),
            r"(?i)rock\+roll \(live\)"
        );
    }

    #[test]
    fn test_build_filter_with_min_capacity() {
        let filter = VenueFilter {
            min_capacity: Some(250),
            ..Default::default()
        };
        let doc = MongoVenueRepository::build_filter(&filter);

        let capacity = doc.get_document("capacity").unwrap();
        assert_eq!(capacity.get_i32("$gte").unwrap(), 250);
    }

    #[test]
    fn test_build_filter_with_search_spans_three_fields() {
        let filter = VenueFilter {
            search: Some("arena".to_string()),
            ..Default::default()
        };
        let doc = MongoVenueRepository::build_filter(&filter);

        let or = doc.get_array("$or").unwrap();
        assert_eq!(or.len(), 3);
    }

    #[test]
    fn test_near_filter_geometry() {
        let query = NearQuery {
            longitude: -9.14,
            latitude: 38.72,
            max_distance_m: 5000.0,
            limit: 10,
        };
        let doc = MongoVenueRepository::near_filter(&query);

        let near = doc
            .get_document("location")
            .unwrap()
            .get_document("$near")
            .unwrap();
        assert_eq!(near.get_f64("$maxDistance").unwrap(), 5000.0);

        let geometry = near.get_document("$geometry").unwrap();
        assert_eq!(geometry.get_str("type").unwrap(), "Point");
        assert_eq!(geometry.get_array("coordinates").unwrap().len(), 2);
    }
}
