use async_trait::async_trait;
use auth::ScopeSet;
use chrono::DateTime;
use chrono::Utc;

use crate::access::errors::AuthError;
use crate::access::models::AccessToken;
use crate::access::models::LoginCommand;
use crate::user::models::User;

/// Port for authentication and authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check a username/password pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No active account with this username
    /// * `IncorrectPassword` - Password does not match the stored digest
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Authenticate and mint an access token.
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError>;

    /// Resolve the caller behind `token` and check it holds every `required` scope.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed, expired or revoked
    /// * `UserNotFound` - Subject no longer exists
    /// * `InactiveAccount` - Subject is disabled
    /// * `InsufficientScope` - A required scope was not granted
    async fn authorize(&self, token: &str, required: &ScopeSet) -> Result<User, AuthError>;

    /// Revoke a valid token until its expiry.
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;
}

/// Revocation list keyed by token id.
#[async_trait]
pub trait TokenDenylist: Send + Sync + 'static {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), AuthError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthError>;
}
