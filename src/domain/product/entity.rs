//! Product entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequential numeric product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Writable product fields, used for create and full replace
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i32,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            stock_quantity: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stock_quantity(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }
}

/// Partial product update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }
}

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: f64,
    stock_quantity: i32,
    created_date: DateTime<Utc>,
    updated_date: Option<DateTime<Utc>>,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock_quantity: draft.stock_quantity,
            created_date: Utc::now(),
            updated_date: None,
        }
    }

    // Getters

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn updated_date(&self) -> Option<DateTime<Utc>> {
        self.updated_date
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    // Mutators

    /// Overwrite every writable field
    pub fn replace(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.stock_quantity = draft.stock_quantity;
        self.touch();
    }

    /// Apply only the fields present in the patch
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_date = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::from_draft(
            ProductId::new(1),
            ProductDraft::new("Laptop", 999.99)
                .with_description("Gaming laptop")
                .with_stock_quantity(10),
        )
    }

    #[test]
    fn test_from_draft() {
        let product = laptop();

        assert_eq!(product.id(), ProductId::new(1));
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.description(), "Gaming laptop");
        assert_eq!(product.stock_quantity(), 10);
        assert!(product.updated_date().is_none());
    }

    #[test]
    fn test_replace_sets_updated_date() {
        let mut product = laptop();
        product.replace(ProductDraft::new("Notebook", 500.0));

        assert_eq!(product.name(), "Notebook");
        assert_eq!(product.description(), "");
        assert_eq!(product.stock_quantity(), 0);
        assert!(product.updated_date().is_some());
    }

    #[test]
    fn test_apply_patch_keeps_absent_fields() {
        let mut product = laptop();
        product.apply(ProductPatch {
            price: Some(899.0),
            ..Default::default()
        });

        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.price(), 899.0);
        assert_eq!(product.stock_quantity(), 10);
        assert!(product.updated_date().is_some());
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let product = laptop();
        assert!(product.name_contains("lap"));
        assert!(product.name_contains("TOP"));
        assert!(!product.name_contains("mouse"));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch {
            name: Some("x".into()),
            ..Default::default()
        }
        .is_empty());
    }
}
