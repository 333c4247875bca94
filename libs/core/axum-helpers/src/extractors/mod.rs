//! Custom extractors for Axum handlers.
//!
//! `UuidPath` turns a malformed path ID into a 400 instead of axum's default
//! rejection, and `ValidatedJson` runs `validator` rules on the deserialized
//! body. Both reject through [`crate::AppError`] so error bodies stay uniform.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
