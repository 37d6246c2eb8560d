//! In-memory product repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::product::{Product, ProductDraft, ProductId, ProductRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct ProductTable {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

impl ProductTable {
    fn empty() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: ProductId::new(1),
        }
    }

    fn insert(&mut self, draft: ProductDraft) -> Product {
        let id = self.next_id;
        self.next_id = id.next();

        let product = Product::from_draft(id, draft);
        self.products.insert(id, product.clone());
        product
    }
}

/// In-memory implementation of ProductRepository
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(ProductTable::empty())),
        }
    }

    /// Create a repository with initial products, ids assigned in order
    pub fn with_products(drafts: Vec<ProductDraft>) -> Self {
        let mut table = ProductTable::empty();
        for draft in drafts {
            table.insert(draft);
        }

        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let table = self.table.read().await;
        Ok(table.products.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let table = self.table.read().await;
        Ok(table.products.values().cloned().collect())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.insert(draft))
    }

    async fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let mut table = self.table.write().await;

        let Some(slot) = table.products.get_mut(&product.id()) else {
            return Err(DomainError::not_found(format!(
                "Product with ID {} not found",
                product.id()
            )));
        };

        *slot = product.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.products.remove(&id).is_some())
    }
}
