//! User Service - Business logic layer

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    RegisterRequest, UpdateUser, User, UserFilter, UserListResponse, UserPublic, UserResponse,
};
use crate::repository::UserRepository;

const MAX_LIMIT: i64 = 100;

/// User service providing registration, credential checks and profile logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user with a hashed password
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        self.validate_password(&input.password)?;

        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail);
        }
        if self.repository.username_exists(&input.username).await? {
            return Err(UserError::DuplicateUsername);
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input, password_hash);

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Verify login credentials (username or email plus password)
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_login(username_or_email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user.into())
    }

    /// Get a user's full profile by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// Get a user's public profile by ID
    #[instrument(skip(self))]
    pub async fn get_public_profile(&self, id: Uuid) -> UserResult<UserPublic> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// List users with filters and a paginated envelope
    #[instrument(skip(self))]
    pub async fn list_users(&self, filter: UserFilter) -> UserResult<UserListResponse> {
        let filter = UserFilter {
            limit: filter.limit.clamp(1, MAX_LIMIT),
            ..filter
        };

        let total = self.repository.count(filter.clone()).await?;
        let users = self.repository.list(filter.clone()).await?;

        Ok(UserListResponse {
            total,
            limit: filter.limit,
            offset: filter.offset,
            items: users.into_iter().map(Into::into).collect(),
        })
    }

    /// Update the caller's own profile. Role changes are not allowed here.
    #[instrument(skip(self, input))]
    pub async fn update_profile(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        if input.role.is_some() {
            return Err(UserError::RoleChangeForbidden);
        }

        self.apply_update(id, input).await
    }

    /// Update any user, including their role (admin operation)
    #[instrument(skip(self, input))]
    pub async fn admin_update_user(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> UserResult<UserResponse> {
        self.apply_update(id, input).await
    }

    /// Delete a user (admin operation). Admins cannot delete themselves.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid, acting_user_id: Uuid) -> UserResult<()> {
        if id == acting_user_id {
            return Err(UserError::SelfDeletion);
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// Change a user's password after checking the current one
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> UserResult<()> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if !self.verify_password(current_password, &user.password_hash)? {
            return Err(UserError::CurrentPasswordIncorrect);
        }

        self.validate_password(new_password)?;

        user.password_hash = self.hash_password(new_password)?;
        user.updated_at = chrono::Utc::now();

        self.repository.update(user).await?;
        Ok(())
    }

    async fn apply_update(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        // Uniqueness pre-checks when email/username change
        if let Some(ref new_email) = input.email {
            if new_email.to_lowercase() != user.email
                && self.repository.email_exists(new_email).await?
            {
                return Err(UserError::DuplicateEmail);
            }
        }
        if let Some(ref new_username) = input.username {
            if new_username != &user.username
                && self.repository.username_exists(new_username).await?
            {
                return Err(UserError::DuplicateUsername);
            }
        }

        let new_password_hash = match input.password {
            Some(ref password) => {
                self.validate_password(password)?;
                Some(self.hash_password(password)?)
            }
            None => None,
        };

        user.apply_update(input, new_password_hash);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn validate_password(&self, password: &str) -> UserResult<()> {
        if password.len() < 8 {
            return Err(UserError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(UserError::Validation(
                "Password must contain at least one digit".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(UserError::Validation(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        Ok(())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
