//! Application state for shared services

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::domain::product::{Product, ProductDraft, ProductId, ProductPatch, ProductRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::TokenAuthority;
use crate::infrastructure::product::ProductService;
use crate::infrastructure::user::{PasswordHasher, RegisterUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub token_authority: Arc<dyn TokenAuthority>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        product_service: Arc<dyn ProductServiceTrait>,
        token_authority: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self {
            user_service,
            product_service,
            token_authority,
        }
    }
}

/// Trait for credential store operations
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError>;
    async fn exists(&self, username: &str, email: &str) -> Result<bool, DomainError>;
    async fn get_by_id(&self, id: UserId) -> Result<User, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<User, DomainError>;
    async fn deactivate(&self, id: UserId) -> Result<User, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for product catalog operations
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ProductServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, DomainError>;
    async fn get(&self, id: ProductId) -> Result<Product, DomainError>;
    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError>;
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DomainError>;
    async fn patch(&self, id: ProductId, patch: ProductPatch) -> Result<Product, DomainError>;
    async fn delete(&self, id: ProductId) -> Result<(), DomainError>;
    async fn search(&self, term: &str) -> Result<Vec<Product>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, username, password).await
    }

    async fn exists(&self, username: &str, email: &str) -> Result<bool, DomainError> {
        UserService::exists(self, username, email).await
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, DomainError> {
        UserService::get_by_id(self, id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        UserService::get_by_username(self, username).await
    }

    async fn deactivate(&self, id: UserId) -> Result<User, DomainError> {
        UserService::deactivate(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: ProductRepository + 'static> ProductServiceTrait for ProductService<R> {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        ProductService::list(self).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, DomainError> {
        ProductService::get(self, id).await
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        ProductService::create(self, draft).await
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DomainError> {
        ProductService::update(self, id, draft).await
    }

    async fn patch(&self, id: ProductId, patch: ProductPatch) -> Result<Product, DomainError> {
        ProductService::patch(self, id, patch).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        ProductService::delete(self, id).await
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, DomainError> {
        ProductService::search(self, term).await
    }
}
