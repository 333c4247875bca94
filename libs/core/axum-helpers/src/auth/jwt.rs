use super::config::JwtConfig;
use crate::errors::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role string carried by admin tokens.
pub const ROLE_ADMIN: &str = "admin";
/// Role string carried by organizer tokens.
pub const ROLE_ORGANIZER: &str = "organizer";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,      // Subject (user ID)
    pub username: String, // Username
    pub email: String,    // User email
    pub role: String,     // User role
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

impl JwtClaims {
    /// Parse the subject claim as the user's UUID.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("Could not validate credentials".to_string()))
    }

    /// Whether this token carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Stateless JWT authentication.
///
/// Tokens are signed with HS256 and carry everything a request handler needs,
/// so verification takes no I/O. Revocation before expiry is not supported;
/// keep token lifetimes short instead.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    access_token_ttl_secs: i64,
}

impl JwtAuth {
    /// Create a new JWT auth instance from config.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt_auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_token_ttl_secs: config.access_token_expire_minutes * 60,
        }
    }

    /// Create an access token for the given user identity.
    pub fn create_access_token(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
        role: &str,
    ) -> eyre::Result<String> {
        self.create_token(user_id, username, email, role, self.access_token_ttl_secs)
    }

    /// Create a JWT token with the specified TTL
    fn create_token(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
        role: &str,
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp,
            iat,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify the token signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
