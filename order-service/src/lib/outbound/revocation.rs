use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::access::errors::AuthError;
use crate::access::ports::TokenDenylist;

/// Revoked token ids with the expiry of the token they belong to.
///
/// Entries outlive their token only until the next revocation, which prunes
/// everything already expired.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenDenylist {
    revoked: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryTokenDenylist {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }
}

#[async_trait]
impl TokenDenylist for InMemoryTokenDenylist {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), AuthError> {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;

        revoked.retain(|_, expiry| *expiry >= now);
        revoked.insert(jti.to_string(), expires_at);

        tracing::debug!(jti, remaining = revoked.len(), "Token added to denylist");
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthError> {
        Ok(self.revoked.read().await.contains_key(jti))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn test_revoked_token_is_listed() {
        let denylist = InMemoryTokenDenylist::new();
        let expires_at = Utc::now() + Duration::minutes(30);

        assert!(!denylist.is_revoked("jti-1").await.unwrap());
        denylist.revoke("jti-1", expires_at).await.unwrap();

        assert!(denylist.is_revoked("jti-1").await.unwrap());
        assert!(!denylist.is_revoked("jti-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entries_pruned_on_write() {
        let denylist = InMemoryTokenDenylist::new();

        denylist
            .revoke("stale", Utc::now() - Duration::minutes(1))
            .await
            .unwrap();
        denylist
            .revoke("fresh", Utc::now() + Duration::minutes(30))
            .await
            .unwrap();

        assert_eq!(denylist.len().await, 1);
        assert!(!denylist.is_revoked("stale").await.unwrap());
        assert!(denylist.is_revoked("fresh").await.unwrap());
    }
}
