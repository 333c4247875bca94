//! Ports for resolving embedded summaries from neighboring domains.
//!
//! The event service never reaches into the users, venues or categories
//! collections directly; the application wires adapters over those services
//! and hands them in as trait objects.

use crate::error::EventResult;
use crate::models::{CategorySummary, UserSummary, VenueSummary};
use async_trait::async_trait;
use uuid::Uuid;

/// Resolves user display data for organizer embeds and attendee records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Returns None when no such user exists
    async fn user_summary(&self, id: Uuid) -> EventResult<Option<UserSummary>>;
}

/// Resolves venue display data for event embeds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueLookup: Send + Sync {
    /// Returns None when no such venue exists
    async fn venue_summary(&self, id: Uuid) -> EventResult<Option<VenueSummary>>;
}

/// Resolves category display data for event embeds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    /// Returns None when no such category exists
    async fn category_summary(&self, id: Uuid) -> EventResult<Option<CategorySummary>>;
}
