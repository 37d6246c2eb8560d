//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct UserTable {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl UserTable {
    fn active(&self) -> impl Iterator<Item = &User> {
        self.users.values().filter(|u| u.is_active())
    }

    fn holds(&self, username: &str, email: &str) -> bool {
        self.active()
            .any(|u| u.username_matches(username) || u.email_matches(email))
    }

    fn insert(&mut self, new_user: NewUser) -> Result<User, DomainError> {
        if self.holds(&new_user.username, &new_user.email) {
            return Err(DomainError::conflict("Username or email already exists."));
        }

        let id = self.next_id;
        self.next_id = id.next();

        let user = User::from_new(id, new_user);
        self.users.insert(id, user.clone());

        Ok(user)
    }
}

/// In-memory implementation of UserRepository
///
/// Rows and the id counter live behind one lock, so the uniqueness check in
/// `create` and the insert happen under the same write guard.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository. Ids start at 1.
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(UserTable {
                users: BTreeMap::new(),
                next_id: UserId::new(1),
            })),
        }
    }

    /// Create a repository with initial users, ids assigned in order
    pub fn with_users(users: Vec<NewUser>) -> Result<Self, DomainError> {
        let mut table = UserTable {
            users: BTreeMap::new(),
            next_id: UserId::new(1),
        };

        for user in users {
            table.insert(user)?;
        }

        Ok(Self {
            table: Arc::new(RwLock::new(table)),
        })
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.active().find(|u| u.username_matches(username)).cloned())
    }

    async fn active_exists(&self, username: &str, email: &str) -> Result<bool, DomainError> {
        let table = self.table.read().await;
        Ok(table.holds(username, email))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        table.insert(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let Some(slot) = table.users.get_mut(&user.id()) else {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        };

        *slot = user.clone();
        Ok(user.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.len())
    }
}
