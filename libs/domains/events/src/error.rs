use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event with ID {0} not found")]
    NotFound(Uuid),

    #[error("Venue with ID {0} not found")]
    VenueNotFound(Uuid),

    #[error("Category with ID {0} not found")]
    CategoryNotFound(Uuid),

    #[error("User with ID {0} not found")]
    UserNotFound(Uuid),

    #[error("Not enough permissions")]
    NotOwner,

    #[error("Only draft events can be published")]
    PublishNotAllowed,

    #[error("Only draft or published events can be canceled")]
    CancelNotAllowed,

    #[error("Registration is only open for published events")]
    RegistrationClosed,

    #[error("Already registered for this event")]
    AlreadyRegistered,

    #[error("Event is at full capacity")]
    CapacityReached,

    #[error("Not registered for this event")]
    NotRegistered,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EventResult<T> = Result<T, EventError>;

/// Convert EventError to AppError for standardized error responses
///
/// Invalid status transitions and registration conflicts are
/// validation-class failures (400).
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => {
                AppError::NotFound(format!("Event with ID {} not found", id))
            }
            EventError::VenueNotFound(id) => {
                AppError::NotFound(format!("Venue with ID {} not found", id))
            }
            EventError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category with ID {} not found", id))
            }
            EventError::UserNotFound(id) => {
                AppError::NotFound(format!("User with ID {} not found", id))
            }
            EventError::NotOwner => AppError::Forbidden("Not enough permissions".to_string()),
            EventError::PublishNotAllowed
            | EventError::CancelNotAllowed
            | EventError::RegistrationClosed
            | EventError::AlreadyRegistered
            | EventError::CapacityReached => AppError::BadRequest(err.to_string()),
            EventError::NotRegistered => AppError::NotFound(err.to_string()),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}
