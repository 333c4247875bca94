//! JWT configuration loaded from the environment.

use core_config::{env_required, ConfigError, FromEnv};

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `ACCESS_TOKEN_EXPIRE_MINUTES` (optional, default: 30)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// // From environment variables
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and default expiry.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        }
    }

    /// Override the access token lifetime.
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let access_token_expire_minutes = match std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
                details: format!("{}", e),
            })?,
            Err(_) => DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        };

        Ok(Self {
            secret,
            access_token_expire_minutes,
        })
    }
}
