use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category with ID {0} not found")]
    NotFound(Uuid),

    #[error("Category with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

/// Convert CategoryError to AppError for standardized error responses
///
/// Duplicate names are a validation-class failure (400), not a conflict.
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => {
                AppError::NotFound(format!("Category with ID {} not found", id))
            }
            CategoryError::DuplicateName(name) => {
                AppError::BadRequest(format!("Category with name '{}' already exists", name))
            }
            CategoryError::Validation(msg) => AppError::BadRequest(msg),
            CategoryError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CategoryError {
    fn from(err: mongodb::error::Error) -> Self {
        CategoryError::Database(err.to_string())
    }
}
