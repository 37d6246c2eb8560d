//! Product repository trait

use async_trait::async_trait;

use super::entity::{Product, ProductDraft, ProductId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for catalog products
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID
    async fn get(&self, id: ProductId) -> Result<Option<Product>, DomainError>;

    /// List all products in id order
    async fn list(&self) -> Result<Vec<Product>, DomainError>;

    /// Assign the next id and store the product
    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError>;

    /// Replace a stored product
    async fn update(&self, product: &Product) -> Result<Product, DomainError>;

    /// Delete a product, returning whether it existed
    async fn delete(&self, id: ProductId) -> Result<bool, DomainError>;
}
