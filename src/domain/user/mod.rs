//! User domain
//!
//! This module provides domain types and traits for user authentication,
//! including user entities, validation, and repository traits.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId, UserStatus, DEFAULT_ROLE};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
