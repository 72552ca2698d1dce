use std::fmt;
use std::str::FromStr;

use auth::ScopeSet;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

/// Scopes granted to self-registered users.
pub const DEFAULT_USER_SCOPES: &str = "product_read product_write user_order_read order_write me";

/// Scopes granted to the bootstrap administrator.
pub const ADMIN_SCOPES: &str =
    "order_read order_write user_order_read product_read product_write me";

/// Credential record of a registered user.
///
/// Identified by its unique username. Carries the password digest and the
/// scopes minted into tokens at login.
#[derive(Debug, Clone)]
pub struct User {
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub scopes: ScopeSet,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub full_name: Option<String>,
    pub password: String,
}

impl RegisterUserCommand {
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, password: String) -> Self {
        Self {
            username,
            email: None,
            full_name: None,
            password,
        }
    }

    pub fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        for raw in ["admin", "user", "john_doe-42"] {
            let username = Username::new(raw.to_string()).unwrap();
            assert_eq!(username.as_str(), raw);
        }
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
    }

    #[test]
    fn test_username_too_long() {
        assert!(matches!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { max: 32, actual: 33 })
        ));
    }

    #[test]
    fn test_username_invalid_characters() {
        assert_eq!(
            Username::new("admin user".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("admin@gmail.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_default_scopes() {
        let scopes = ScopeSet::parse(DEFAULT_USER_SCOPES);
        assert!(scopes.contains("me"));
        assert!(scopes.contains("user_order_read"));
        assert!(!scopes.contains("order_read"));

        assert!(scopes.is_satisfied_by(&ScopeSet::parse(ADMIN_SCOPES)));
    }
}
