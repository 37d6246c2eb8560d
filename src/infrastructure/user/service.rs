//! User service for registration and authentication

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{
    validate_email, validate_password, validate_username, NewUser, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterUserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// User service for authentication and registration
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user with the default role
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&request.password)?;

        // Uniqueness is re-checked atomically by the repository
        let user = self
            .repository
            .create(NewUser::new(request.username, request.email, password_hash))
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");
        Ok(user)
    }

    /// Authenticate a user with username and password
    ///
    /// Every failure is reported as `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let Some(user) = self.repository.find_active_by_username(username).await? else {
            debug!(username = %username, "No active user for login attempt");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            warn!(user_id = %user.id(), "Password mismatch on login");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    /// True if an active user already holds the username or the email
    pub async fn exists(&self, username: &str, email: &str) -> Result<bool, DomainError> {
        self.repository.active_exists(username, email).await
    }

    /// Get an active user by ID
    pub async fn get_by_id(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// Get an active user by username
    pub async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.repository
            .find_active_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }

    /// Deactivate a user. Tokens already issued to the user stay valid until they expire.
    pub async fn deactivate(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.get_by_id(id).await?;
        user.deactivate();

        let user = self.repository.update(&user).await?;
        info!(user_id = %id, "User deactivated");
        Ok(user)
    }

    /// Count all stored users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
