//! Product catalog domain

mod entity;
mod repository;

pub use entity::{Product, ProductDraft, ProductId, ProductPatch};
pub use repository::ProductRepository;

#[cfg(test)]
pub use repository::MockProductRepository;
