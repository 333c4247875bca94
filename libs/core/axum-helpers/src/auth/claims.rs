//! Role-gate extractors that verify the bearer token themselves.
//!
//! The app installs the shared [`JwtAuth`] once with `Extension`, and each
//! protected handler names the extractor matching the access it needs. Public
//! handlers simply omit them, so public and protected methods can share a
//! path.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Extension, Router, routing::get};
//! use axum_helpers::{AdminClaims, AuthClaims, JwtAuth};
//!
//! async fn me(AuthClaims(claims): AuthClaims) -> String {
//!     format!("Hello, {}", claims.username)
//! }
//!
//! async fn admin_only(AdminClaims(claims): AdminClaims) { /* ... */ }
//!
//! let app: Router = Router::new()
//!     .route("/me", get(me))
//!     .route("/admin", get(admin_only))
//!     .layer(Extension(jwt_auth));
//! ```

use super::jwt::{JwtAuth, JwtClaims, ROLE_ADMIN, ROLE_ORGANIZER};
use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};

/// Extract the JWT from the Authorization header or an `access_token` cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    // Authorization header first: "Bearer <token>"
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

fn verify_from_parts(parts: &Parts) -> Result<JwtClaims, Response> {
    let auth = parts.extensions.get::<JwtAuth>().ok_or_else(|| {
        tracing::error!("JwtAuth extension missing; add `.layer(Extension(jwt_auth))`");
        AppError::InternalServerError("Authentication is not configured".to_string())
            .into_response()
    })?;

    let token = extract_token(&parts.headers).ok_or_else(|| {
        tracing::debug!("No JWT found in Authorization header or cookie");
        AppError::Unauthorized("Not authenticated".to_string()).into_response()
    })?;

    auth.verify_token(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Could not validate credentials".to_string()).into_response()
    })
}

/// Claims of any authenticated user.
///
/// # Example
/// ```ignore
/// async fn me(AuthClaims(claims): AuthClaims) -> String {
///     format!("Hello, {}", claims.username)
/// }
/// ```
pub struct AuthClaims(pub JwtClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        verify_from_parts(parts).map(AuthClaims)
    }
}

/// Claims of an authenticated admin. Rejects other roles with 403.
pub struct AdminClaims(pub JwtClaims);

impl<S> FromRequestParts<S> for AdminClaims
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = verify_from_parts(parts)?;

        if claims.role != ROLE_ADMIN {
            return Err(
                AppError::Forbidden("Admin privileges required".to_string()).into_response(),
            );
        }

        Ok(AdminClaims(claims))
    }
}

/// Claims of an authenticated organizer or admin. Rejects other roles with 403.
pub struct OrganizerClaims(pub JwtClaims);

impl<S> FromRequestParts<S> for OrganizerClaims
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = verify_from_parts(parts)?;

        if claims.role != ROLE_ORGANIZER && claims.role != ROLE_ADMIN {
            return Err(
                AppError::Forbidden("Organizer privileges required".to_string()).into_response(),
            );
        }

        Ok(OrganizerClaims(claims))
    }
}
