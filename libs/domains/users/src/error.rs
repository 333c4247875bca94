use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with ID {0} not found")]
    NotFound(Uuid),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Incorrect username/email or password")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("Not allowed to change your own role")]
    RoleChangeForbidden,

    #[error("Cannot delete yourself")]
    SelfDeletion,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
///
/// Uniqueness conflicts and domain rule violations surface as 400, bad
/// credentials as 401, role/ownership violations as 403.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => {
                AppError::NotFound(format!("User with ID {} not found", id))
            }
            UserError::DuplicateEmail => {
                AppError::BadRequest("Email already registered".to_string())
            }
            UserError::DuplicateUsername => {
                AppError::BadRequest("Username already taken".to_string())
            }
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Incorrect username/email or password".to_string())
            }
            UserError::CurrentPasswordIncorrect => {
                AppError::BadRequest("Current password is incorrect".to_string())
            }
            UserError::RoleChangeForbidden => {
                AppError::Forbidden("Not allowed to change your own role".to_string())
            }
            UserError::SelfDeletion => AppError::BadRequest("Cannot delete yourself".to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
