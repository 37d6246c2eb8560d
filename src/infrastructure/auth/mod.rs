//! Authentication infrastructure module
//!
//! This module provides signed, time-bound bearer tokens for user authentication.

mod jwt;

pub use jwt::{
    IssuedToken, JwtClaims, JwtConfig, JwtService, TokenAuthority, DEFAULT_AUDIENCE,
    DEFAULT_EXPIRATION_MINUTES, DEFAULT_ISSUER,
};
