use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Review with ID {0} not found")]
    NotFound(Uuid),

    #[error("Event with ID {0} not found")]
    EventNotFound(Uuid),

    #[error("User with ID {0} not found")]
    AuthorNotFound(Uuid),

    #[error("You have already reviewed this event")]
    AlreadyReviewed,

    #[error("Not enough permissions")]
    NotAuthor,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

/// Convert ReviewError to AppError for standardized error responses
impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(id) => {
                AppError::NotFound(format!("Review with ID {} not found", id))
            }
            ReviewError::EventNotFound(id) => {
                AppError::NotFound(format!("Event with ID {} not found", id))
            }
            ReviewError::AuthorNotFound(id) => {
                AppError::NotFound(format!("User with ID {} not found", id))
            }
            ReviewError::AlreadyReviewed => AppError::BadRequest(err.to_string()),
            ReviewError::NotAuthor => AppError::Forbidden("Not enough permissions".to_string()),
            ReviewError::Validation(msg) => AppError::BadRequest(msg),
            ReviewError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ReviewError {
    fn from(err: mongodb::error::Error) -> Self {
        ReviewError::Database(err.to_string())
    }
}
