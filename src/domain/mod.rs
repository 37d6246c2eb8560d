//! Domain layer - Core business logic and entities

pub mod error;
pub mod product;
pub mod user;

pub use error::DomainError;
pub use product::{Product, ProductDraft, ProductId, ProductPatch, ProductRepository};
pub use user::{NewUser, User, UserId, UserRepository, UserStatus};
