//! Infrastructure layer - Implementations of domain traits and process plumbing

pub mod auth;
pub mod logging;
pub mod observability;
pub mod product;
pub mod user;
