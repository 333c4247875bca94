use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// User role
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Regular attendee
    #[default]
    User,
    /// Can create and manage own events
    Organizer,
    /// Full access, including user administration
    Admin,
}

/// User entity - represents a user stored in MongoDB
///
/// This is the storage shape; API responses go through [`UserResponse`] or
/// [`UserPublic`], which never carry the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Unique username
    pub username: String,
    /// Unique email, stored lowercased
    pub email: String,
    /// Argon2 password hash
    pub password_hash: String,
    /// Display name
    pub full_name: Option<String>,
    /// Short free-form bio
    pub bio: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Role used for authorization
    pub role: Role,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Full user profile returned to the user themselves or to admins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            bio: user.bio,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public user profile (visible to anyone)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            bio: user.bio,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// DTO for user registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Must be at least 8 characters with one digit and one uppercase letter
    pub password: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email address
    #[validate(length(min = 1, max = 255))]
    pub username_or_email: String,
    pub password: String,
}

/// Bearer token issued on login/register/refresh
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// DTO for password change
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    /// Must satisfy the registration password rules
    pub new_password: String,
}

/// Simple confirmation message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// DTO for updating a user
///
/// Used both for self-service profile updates (where `role` is rejected) and
/// admin updates (where `role` is applied).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub role: Option<Role>,
}

/// Paginated user list envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub total: u64,
    pub limit: i64,
    pub offset: u64,
    pub items: Vec<UserResponse>,
}

/// Query filters for listing users
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct UserFilter {
    /// Filter by role
    pub role: Option<Role>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    10
}

impl User {
    /// Create a new user (password already hashed by the service layer)
    pub fn new(input: RegisterRequest, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email.to_lowercase(),
            password_hash,
            full_name: input.full_name,
            bio: input.bio,
            phone: input.phone,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates (password already hashed by the service layer if present)
    pub fn apply_update(&mut self, update: UpdateUser, new_password_hash: Option<String>) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email.to_lowercase();
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        if let Some(full_name) = update.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "Password1".to_string(),
            full_name: None,
            bio: None,
            phone: None,
        }
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(register_request("alice", "Alice@Example.COM"), "hash".into());

        assert_eq!(user.role, Role::User);
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_apply_update_keeps_unset_fields() {
        let mut user = User::new(register_request("alice", "alice@example.com"), "hash".into());
        user.full_name = Some("Alice".to_string());

        user.apply_update(
            UpdateUser {
                bio: Some("Organizes meetups".to_string()),
                ..Default::default()
            },
            None,
        );

        assert_eq!(user.full_name.as_deref(), Some("Alice"));
        assert_eq!(user.bio.as_deref(), Some("Organizes meetups"));
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_apply_update_role_and_password() {
        let mut user = User::new(register_request("bob", "bob@example.com"), "old-hash".into());

        user.apply_update(
            UpdateUser {
                role: Some(Role::Organizer),
                ..Default::default()
            },
            Some("new-hash".to_string()),
        );

        assert_eq!(user.role, Role::Organizer);
        assert_eq!(user.password_hash, "new-hash");
    }

    #[test]
    fn test_role_serializes_snake_case() {
        assert_eq!(Role::Organizer.to_string(), "organizer");
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }
}
