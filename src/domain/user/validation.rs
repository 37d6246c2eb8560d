//! User validation utilities

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username is required")]
    EmptyUsername,

    #[error("Username must be between {0} and {1} characters")]
    UsernameLength(usize, usize),

    #[error("Email is required")]
    EmptyEmail,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Password must be between {0} and {1} characters")]
    PasswordLength(usize, usize),
}

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Between 3 and 50 characters
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.trim().is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(UserValidationError::UsernameLength(
            MIN_USERNAME_LENGTH,
            MAX_USERNAME_LENGTH,
        ));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !email.validate_email() {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Between 6 and 100 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(UserValidationError::PasswordLength(
            MIN_PASSWORD_LENGTH,
            MAX_PASSWORD_LENGTH,
        ));
    }

    Ok(())
}
