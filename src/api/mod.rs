//! HTTP API layer

pub mod auth;
pub mod health;
pub mod middleware;
pub mod products;
pub mod router;
pub mod state;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use router::create_router_with_state;
pub use state::AppState;
