//! Database library providing the MongoDB connector and shared utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection management and health checks
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("events");
//! let collection = db.collection::<Event>("events");
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{retry_with_backoff, RetryConfig};
