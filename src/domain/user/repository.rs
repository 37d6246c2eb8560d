//! User repository trait

use async_trait::async_trait;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
///
/// Lookups by username or email are case-insensitive and only consider
/// active users. Implementations must make `create` an atomic
/// check-and-insert so that concurrent registrations cannot both succeed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID regardless of status
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Find an active user by username (for login)
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// True if any active user has the given username or email
    async fn active_exists(&self, username: &str, email: &str) -> Result<bool, DomainError>;

    /// Assign the next id and store the user.
    ///
    /// Fails with `Conflict` if an active user already holds the username or email.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replace a stored user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;
}
