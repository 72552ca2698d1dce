use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::ScopeSet;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::access::errors::AuthError;
use crate::access::models::AccessToken;
use crate::access::models::LoginCommand;
use crate::access::ports::AuthServicePort;
use crate::access::ports::TokenDenylist;
use crate::user::models::User;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Login and per-request access checks.
///
/// Scopes are trusted from the token. The user lookup on every request only
/// resolves the record and honours the active flag.
pub struct AuthService<UR, TD>
where
    UR: UserRepository,
    TD: TokenDenylist,
{
    users: Arc<UR>,
    denylist: Arc<TD>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<UR, TD> AuthService<UR, TD>
where
    UR: UserRepository,
    TD: TokenDenylist,
{
    /// # Arguments
    /// * `users` - Credential record lookup
    /// * `denylist` - Revoked token ids
    /// * `authenticator` - Password verifier and token codec
    /// * `token_ttl` - Lifetime of minted tokens
    pub fn new(
        users: Arc<UR>,
        denylist: Arc<TD>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            denylist,
            authenticator,
            token_ttl,
        }
    }

    async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.authenticator.parse(token)?;

        if self.denylist.is_revoked(&claims.jti).await? {
            return Err(AuthError::InvalidToken("token revoked".to_string()));
        }

        Ok(claims)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, AuthError> {
        let username = match Username::new(username.to_string()) {
            Ok(username) => username,
            Err(_) => return Ok(None),
        };

        Ok(self.users.find_by_username(&username).await?)
    }
}

#[async_trait]
impl<UR, TD> AuthServicePort for AuthService<UR, TD>
where
    UR: UserRepository,
    TD: TokenDenylist,
{
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = match self.find_user(username).await?.filter(User::is_active) {
            Some(user) => user,
            None => {
                self.authenticator.verify_decoy(password);
                return Err(AuthError::UserNotFound(username.to_string()));
            }
        };

        self.authenticator
            .verify_password(password, &user.password_hash)?;

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError> {
        let user = self
            .authenticate(&command.username, &command.password)
            .await?;

        let scopes = command.granted_scopes(&user.scopes);
        let token = self
            .authenticator
            .issue(user.username.as_str(), &scopes, self.token_ttl)?;

        tracing::debug!(user = %user.username, scopes = %scopes, "Issued access token");

        Ok(AccessToken::bearer(token))
    }

    async fn authorize(&self, token: &str, required: &ScopeSet) -> Result<User, AuthError> {
        let claims = self.validate(token).await?;

        let user = self
            .find_user(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(claims.sub.clone()))?;

        if !user.is_active() {
            return Err(AuthError::InactiveAccount(claims.sub));
        }

        if let Some(missing) = required.first_missing(&claims.scope_set()) {
            return Err(AuthError::InsufficientScope {
                missing: missing.to_string(),
                required: required.clone(),
            });
        }

        Ok(user)
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.validate(token).await?;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("expiry out of range".to_string()))?;

        self.denylist.revoke(&claims.jti, expires_at).await?;
        tracing::info!(user = %claims.sub, jti = %claims.jti, "Revoked access token");

        Ok(())
    }
}
