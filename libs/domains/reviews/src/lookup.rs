//! Ports for reaching neighboring domains.
//!
//! The review service never reads the users or events collections directly;
//! the application wires adapters over those services and hands them in as
//! trait objects.

use crate::error::ReviewResult;
use crate::models::ReviewAuthor;
use async_trait::async_trait;
use uuid::Uuid;

/// Resolves author display data for the review embed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorLookup: Send + Sync {
    /// Returns None when no such user exists
    async fn author_summary(&self, id: Uuid) -> ReviewResult<Option<ReviewAuthor>>;
}

/// Answers whether the reviewed event exists
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventLookup: Send + Sync {
    async fn event_exists(&self, id: Uuid) -> ReviewResult<bool>;
}
