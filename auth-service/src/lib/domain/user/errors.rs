use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for session store operations
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Connection to session store failed: {0}")]
    ConnectionFailed(String),

    #[error("Failed to write session: {0}")]
    WriteFailed(String),

    #[error("Failed to read session: {0}")]
    ReadFailed(String),
}

/// Top-level error for all user and session operations.
///
/// `Unauthorized` carries no detail: bad credentials, forged
/// tokens, missing permission rows, and failed permission lookups all
/// collapse into it.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Hashing(err.to_string())
    }
}
