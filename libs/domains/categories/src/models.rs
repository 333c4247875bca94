//! Category domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category entity stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// UUID primary key, stored as `_id`
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Unique category name
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category as returned by the API
///
/// Same fields as [`Category`], but with the UUID under `id` instead of the
/// storage-level `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// DTO for updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Paginated category list envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub total: u64,
    pub limit: i64,
    pub offset: u64,
    pub items: Vec<CategoryResponse>,
}

/// Query parameters for listing categories
///
/// Listings are always sorted by name; there are no field filters.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    10
}

impl Category {
    /// Create a new category from a create DTO
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply partial updates
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_sets_timestamps() {
        let category = Category::new(CreateCategory {
            name: "Music".to_string(),
            description: None,
        });

        assert_eq!(category.name, "Music");
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_apply_update_keeps_unset_fields() {
        let mut category = Category::new(CreateCategory {
            name: "Music".to_string(),
            description: Some("Concerts and festivals".to_string()),
        });

        category.apply_update(UpdateCategory {
            name: Some("Live Music".to_string()),
            description: None,
        });

        assert_eq!(category.name, "Live Music");
        assert_eq!(
            category.description.as_deref(),
            Some("Concerts and festivals")
        );
        assert!(category.updated_at >= category.created_at);
    }

    #[test]
    fn test_category_serializes_id_as_underscore_id() {
        let category = Category::new(CreateCategory {
            name: "Music".to_string(),
            description: None,
        });

        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());
    }
}
