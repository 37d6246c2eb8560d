//! User infrastructure module
//!
//! Password verifiers, the in-memory user table, and the user service that
//! ties them together for registration and login.

mod password;
mod repository;
mod service;

pub use password::{
    Argon2Hasher, PasswordHasher, PasswordHasherKind, SaltedSha256Hasher, FIXED_SALT,
};
pub use repository::InMemoryUserRepository;
pub use service::{RegisterUserRequest, UserService};
