use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::scopes::ScopeSet;

/// Claim set carried by an access token.
///
/// `sub` is the username, `scopes` the granted OAuth2 scopes. `jti` names the
/// individual token so it can be revoked before `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Granted scopes
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID
    pub jti: String,
}

impl Claims {
    /// Build claims for `subject` valid from now for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Username the token is minted for
    /// * `scopes` - Scopes granted to the bearer
    /// * `ttl` - Lifetime of the token
    pub fn new(subject: impl ToString, scopes: &ScopeSet, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            scopes: scopes.to_vec(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Override expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    pub fn scope_set(&self) -> ScopeSet {
        self.scopes.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let scopes = ScopeSet::parse("order_read me");
        let claims = Claims::new("admin", &scopes, Duration::minutes(30));

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.scopes, vec!["me".to_string(), "order_read".to_string()]);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_token_gets_distinct_id() {
        let scopes = ScopeSet::new();
        let first = Claims::new("admin", &scopes, Duration::minutes(1));
        let second = Claims::new("admin", &scopes, Duration::minutes(1));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_scope_set() {
        let claims = Claims::new("user", &ScopeSet::parse("product_read"), Duration::minutes(1));
        assert!(claims.scope_set().contains("product_read"));
        assert!(!claims.scope_set().contains("me"));
    }

    #[test]
    fn test_with_expiration_overrides_exp_only() {
        let claims = Claims::new("admin", &ScopeSet::new(), Duration::minutes(1));
        let overridden = claims.clone().with_expiration(1000);

        assert_eq!(overridden.exp, 1000);
        assert_eq!(overridden.iat, claims.iat);
        assert_eq!(overridden.jti, claims.jti);
    }

    #[test]
    fn test_missing_scopes_field_defaults_to_empty() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "admin",
            "exp": 2000,
            "iat": 1000,
            "jti": "abc"
        }))
        .unwrap();

        assert!(claims.scopes.is_empty());
    }
}
