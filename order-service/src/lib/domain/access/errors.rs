use auth::ScopeSet;
use thiserror::Error;

use crate::user::errors::UserError;

/// Authentication and authorization failures.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Inactive account: {0}")]
    InactiveAccount(String),

    #[error("Missing scope {missing}")]
    InsufficientScope { missing: String, required: ScopeSet },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByUsername(username) => AuthError::UserNotFound(username),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::EncodingFailed(e) => AuthError::Internal(e),
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::IncorrectPassword,
            auth::AuthenticationError::PasswordError(e) => AuthError::Internal(e.to_string()),
        }
    }
}
