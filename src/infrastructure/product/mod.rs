//! Product catalog infrastructure module

mod repository;
mod service;

pub use repository::InMemoryProductRepository;
pub use service::ProductService;
