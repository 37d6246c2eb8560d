//! Product catalog service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::product::{Product, ProductDraft, ProductId, ProductPatch, ProductRepository};
use crate::domain::DomainError;

/// Product service enforcing catalog business rules over a repository
#[derive(Debug)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all products
    pub async fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.repository.list().await
    }

    /// Get a product by ID
    pub async fn get(&self, id: ProductId) -> Result<Product, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create a product
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        check_name(&draft.name)?;
        check_price(draft.price)?;

        let product = self.repository.create(draft).await?;
        info!(product_id = %product.id(), name = %product.name(), "Product created");
        Ok(product)
    }

    /// Replace every writable field of a product
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DomainError> {
        let mut product = self.get(id).await?;

        check_name(&draft.name)?;
        check_price(draft.price)?;

        product.replace(draft);
        let product = self.repository.update(&product).await?;
        debug!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Apply the fields present in a patch. An empty patch returns the product
    /// unchanged and leaves `updated_date` alone.
    pub async fn patch(&self, id: ProductId, patch: ProductPatch) -> Result<Product, DomainError> {
        let mut product = self.get(id).await?;

        if patch.is_empty() {
            return Ok(product);
        }

        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
        }

        product.apply(patch);
        let product = self.repository.update(&product).await?;
        debug!(product_id = %id, "Product patched");
        Ok(product)
    }

    /// Delete a product
    pub async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Case-insensitive substring search over product names
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, DomainError> {
        if term.trim().is_empty() {
            return Err(DomainError::validation("Search term is required."));
        }

        let products = self.repository.list().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.name_contains(term))
            .collect())
    }
}

fn not_found(id: ProductId) -> DomainError {
    DomainError::not_found(format!("Product with ID {} not found.", id))
}

fn check_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Product name is required."));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), DomainError> {
    if price < 0.0 || price.is_nan() {
        return Err(DomainError::validation("Product price cannot be negative."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::MockProductRepository;
    use crate::infrastructure::product::repository::InMemoryProductRepository;
    use tokio_test::assert_err;

    fn create_service() -> ProductService<InMemoryProductRepository> {
        let repository = InMemoryProductRepository::with_products(vec![
            ProductDraft::new("Laptop", 999.99).with_stock_quantity(10),
            ProductDraft::new("Mouse", 29.99).with_stock_quantity(50),
            ProductDraft::new("Keyboard", 79.99).with_stock_quantity(25),
        ]);
        ProductService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let service = create_service();

        let product = service
            .create(ProductDraft::new("Monitor", 199.0).with_description("27 inch"))
            .await
            .unwrap();

        assert_eq!(product.id(), ProductId::new(4));
        assert!(product.updated_date().is_none());
        assert_eq!(service.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_and_negative_price() {
        let service = create_service();

        let blank = service.create(ProductDraft::new("   ", 10.0)).await;
        let negative = service.create(ProductDraft::new("Cable", -1.0)).await;

        assert!(matches!(blank, Err(DomainError::Validation { .. })));
        assert!(matches!(negative, Err(DomainError::Validation { .. })));
        assert_eq!(service.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let service = create_service();

        let result = service.get(ProductId::new(99)).await;
        match result {
            Err(DomainError::NotFound { message }) => {
                assert_eq!(message, "Product with ID 99 not found.")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let service = create_service();

        let updated = service
            .update(ProductId::new(2), ProductDraft::new("Trackball", 49.5))
            .await
            .unwrap();

        assert_eq!(updated.name(), "Trackball");
        assert_eq!(updated.description(), "");
        assert_eq!(updated.stock_quantity(), 0);
        assert!(updated.updated_date().is_some());

        let fetched = service.get(ProductId::new(2)).await.unwrap();
        assert_eq!(fetched.price(), 49.5);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = create_service();

        let result = service
            .update(ProductId::new(42), ProductDraft::new("X", 1.0))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_patch_touches_only_given_fields() {
        let service = create_service();

        let patched = service
            .patch(
                ProductId::new(1),
                ProductPatch {
                    price: Some(899.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.name(), "Laptop");
        assert_eq!(patched.price(), 899.0);
        assert_eq!(patched.stock_quantity(), 10);
        assert!(patched.updated_date().is_some());
    }

    #[tokio::test]
    async fn test_empty_patch_is_a_no_op() {
        let service = create_service();

        let unchanged = service
            .patch(ProductId::new(2), ProductPatch::default())
            .await
            .unwrap();

        assert_eq!(unchanged.name(), "Mouse");
        assert_eq!(unchanged.price(), 29.99);
        assert!(unchanged.updated_date().is_none());

        let missing = service.patch(ProductId::new(99), ProductPatch::default()).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_patch_validates_present_fields() {
        let service = create_service();

        let result = service
            .patch(
                ProductId::new(1),
                ProductPatch {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;
        assert_err!(result);

        assert_eq!(service.get(ProductId::new(1)).await.unwrap().name(), "Laptop");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();

        service.delete(ProductId::new(3)).await.unwrap();

        assert_err!(service.get(ProductId::new(3)).await);
        let again = service.delete(ProductId::new(3)).await;
        assert!(matches!(again, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search() {
        let service = create_service();

        let found = service.search("o").await.unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Laptop", "Mouse", "Keyboard"]);

        let found = service.search("KEY").await.unwrap();
        assert_eq!(found.len(), 1);

        assert!(service.search("tablet").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let service = create_service();

        let result = service.search("  ").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_list()
            .returning(|| Err(DomainError::storage("catalog unavailable")));

        let service = ProductService::new(Arc::new(repository));

        let result = service.search("mouse").await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_delete_uses_repository_result() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_delete()
            .withf(|id| *id == ProductId::new(5))
            .times(1)
            .returning(|_| Ok(false));

        let service = ProductService::new(Arc::new(repository));

        let result = service.delete(ProductId::new(5)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
