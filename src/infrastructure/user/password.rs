//! Password verifier derivation
//!
//! Two hashers are available. [`SaltedSha256Hasher`] is the default and is
//! deterministic: SHA-256 over the password followed by a salt shared by every
//! account, base64 encoded. That means equal passwords produce equal verifiers
//! and the hash is fast to brute force. [`Argon2Hasher`] is the hardened
//! alternative and is selected with `auth.password_hasher = "argon2"`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Salt appended to every password by [`SaltedSha256Hasher`]
pub const FIXED_SALT: &str = "BasicApiSalt";

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Derive a verifier from a plaintext password
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored verifier
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Which hasher new verifiers are produced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PasswordHasherKind {
    #[default]
    SaltedSha256,
    Argon2,
}

/// Deterministic SHA-256 hasher with a fixed, shared salt
#[derive(Debug, Clone, Copy)]
pub struct SaltedSha256Hasher;

impl SaltedSha256Hasher {
    pub fn new() -> Self {
        Self
    }

    fn derive(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(FIXED_SALT.as_bytes());
        STANDARD.encode(hasher.finalize())
    }
}

impl Default for SaltedSha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(self.derive(password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        self.derive(password).as_bytes() == hash.as_bytes()
    }
}

/// Argon2id hasher with a random salt per verifier
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salted_sha256_is_deterministic() {
        let hasher = SaltedSha256Hasher::new();

        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();

        assert_eq!(first, second);
        // base64 of a 32-byte digest
        assert_eq!(first.len(), 44);
    }

    #[test]
    fn test_salted_sha256_matches_known_verifier() {
        let hasher = SaltedSha256Hasher::new();

        let mut digest = Sha256::new();
        digest.update(b"admin123BasicApiSalt");
        let expected = STANDARD.encode(digest.finalize());

        assert_eq!(hasher.hash("admin123").unwrap(), expected);
    }

    #[test]
    fn test_salted_sha256_verify() {
        let hasher = SaltedSha256Hasher::new();
        let verifier = hasher.hash("secret123").unwrap();

        assert!(hasher.verify("secret123", &verifier));
        assert!(!hasher.verify("secret124", &verifier));
        assert!(!hasher.verify("Secret123", &verifier));
        assert!(!hasher.verify("", &verifier));
    }

    #[test]
    fn test_distinct_passwords_distinct_verifiers() {
        let hasher = SaltedSha256Hasher::new();
        let passwords = ["a", "b", "password", "password ", "pässword", ""];

        for p1 in passwords {
            for p2 in passwords {
                let verifier = hasher.hash(p2).unwrap();
                assert_eq!(hasher.verify(p1, &verifier), p1 == p2, "{p1:?} vs {p2:?}");
            }
        }
    }

    #[test]
    fn test_argon2_hash_and_verify() {
        let hasher = Argon2Hasher::new();

        let hash1 = hasher.hash("my_secure_password").unwrap();
        let hash2 = hasher.hash("my_secure_password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("my_secure_password", &hash1));
        assert!(hasher.verify("my_secure_password", &hash2));
        assert!(!hasher.verify("wrong_password", &hash1));
    }

    #[test]
    fn test_argon2_rejects_foreign_verifier() {
        let sha_verifier = SaltedSha256Hasher::new().hash("password").unwrap();

        assert!(!Argon2Hasher::new().verify("password", &sha_verifier));
        assert!(!Argon2Hasher::new().verify("password", ""));
    }
}
