//! Venue domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// GeoJSON Point: `{"type": "Point", "coordinates": [longitude, latitude]}`
///
/// Coordinate order is longitude first, as MongoDB's 2dsphere index expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "default_point_type")]
    pub point_type: String,
    pub coordinates: [f64; 2],
}

fn default_point_type() -> String {
    "Point".to_string()
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            point_type: default_point_type(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Venue entity stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    /// UUID primary key, stored as `_id`
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Optional GeoJSON location backing the 2dsphere index
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Venue as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VenueResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub amenities: Vec<String>,
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            address: venue.address,
            city: venue.city,
            country: venue.country,
            postal_code: venue.postal_code,
            description: venue.description,
            capacity: venue.capacity,
            amenities: venue.amenities,
            location: venue.location,
            created_at: venue.created_at,
            updated_at: venue.updated_at,
        }
    }
}

/// DTO for creating a venue
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateVenue {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 2))]
    pub country: String,
    pub postal_code: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub location: Option<GeoPoint>,
}

/// DTO for updating a venue
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVenue {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub city: Option<String>,
    #[validate(length(min = 2))]
    pub country: Option<String>,
    pub postal_code: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub capacity: Option<i32>,
    /// Replaces the whole amenities list when present
    pub amenities: Option<Vec<String>>,
    pub location: Option<GeoPoint>,
}

/// Paginated venue list envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VenueListResponse {
    pub total: u64,
    pub limit: i64,
    pub offset: u64,
    pub items: Vec<VenueResponse>,
}

/// Query filters for listing venues
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct VenueFilter {
    /// Case-insensitive match on city
    pub city: Option<String>,
    /// Case-insensitive match on country
    pub country: Option<String>,
    /// Only venues with at least this capacity
    pub min_capacity: Option<i32>,
    /// Case-insensitive search over name, description and address
    pub search: Option<String>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

/// Query parameters for the nearby search
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct NearQuery {
    pub longitude: f64,
    pub latitude: f64,
    /// Maximum distance in meters (default 10 km)
    #[serde(default = "default_max_distance")]
    pub max_distance_m: f64,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

fn default_max_distance() -> f64 {
    10_000.0
}

impl Venue {
    /// Create a new venue from a create DTO
    pub fn new(input: CreateVenue) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            address: input.address,
            city: input.city,
            country: input.country,
            postal_code: input.postal_code,
            description: input.description,
            capacity: input.capacity,
            amenities: input.amenities,
            location: input.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply partial updates
    pub fn apply_update(&mut self, update: UpdateVenue) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(country) = update.country {
            self.country = country;
        }
        if let Some(postal_code) = update.postal_code {
            self.postal_code = Some(postal_code);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(capacity) = update.capacity {
            self.capacity = Some(capacity);
        }
        if let Some(amenities) = update.amenities {
            self.amenities = amenities;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        self.updated_at = Utc::now();
    }
}
