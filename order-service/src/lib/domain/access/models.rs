use auth::ScopeSet;
use serde::Serialize;

pub const SCOPE_ORDER_READ: &str = "order_read";
pub const SCOPE_ORDER_WRITE: &str = "order_write";
pub const SCOPE_USER_ORDER_READ: &str = "user_order_read";
pub const SCOPE_PRODUCT_READ: &str = "product_read";
pub const SCOPE_PRODUCT_WRITE: &str = "product_write";
pub const SCOPE_ME: &str = "me";

/// Bearer token handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// OAuth2 password-grant login attempt.
///
/// `requested_scopes` narrows the granted scopes to those also held by the
/// account. When absent every stored scope is granted.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
    pub requested_scopes: Option<ScopeSet>,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            requested_scopes: None,
        }
    }

    pub fn with_requested_scopes(mut self, scopes: ScopeSet) -> Self {
        self.requested_scopes = Some(scopes);
        self
    }

    /// Scopes to mint into the token given what the account holds.
    pub fn granted_scopes(&self, stored: &ScopeSet) -> ScopeSet {
        match &self.requested_scopes {
            Some(requested) => requested.intersection(stored),
            None => stored.clone(),
        }
    }
}
