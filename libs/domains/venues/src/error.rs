use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("Venue with ID {0} not found")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type VenueResult<T> = Result<T, VenueError>;

/// Convert VenueError to AppError for standardized error responses
impl From<VenueError> for AppError {
    fn from(err: VenueError) -> Self {
        match err {
            VenueError::NotFound(id) => {
                AppError::NotFound(format!("Venue with ID {} not found", id))
            }
            VenueError::Validation(msg) => AppError::BadRequest(msg),
            VenueError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for VenueError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for VenueError {
    fn from(err: mongodb::error::Error) -> Self {
        VenueError::Database(err.to_string())
    }
}
