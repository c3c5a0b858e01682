use thiserror::Error;

use crate::credentials::EmailError;
use crate::credentials::UsernameError;

/// Error for AdminId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for admin account operations
#[derive(Debug, Clone, Error)]
pub enum AdminError {
    #[error("Invalid admin ID: {0}")]
    InvalidAdminId(#[from] AdminIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Admin not found")]
    NotFoundByUsername(String),

    #[error("Admin already exists")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
