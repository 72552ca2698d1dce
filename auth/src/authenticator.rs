use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::scopes::ScopeSet;

/// Credential verification and access-token codec.
///
/// Owns the signing key (read-only after construction) and the credential
/// hasher. Holds no per-request state, so one instance can be shared across
/// all request handlers.
pub struct Authenticator {
    hasher: Box<dyn CredentialHasher>,
    jwt_handler: JwtHandler,
    decoy_digest: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create an authenticator signing with `jwt_secret` and hashing with Argon2id.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_hasher(jwt_secret, PasswordHasher::new())
    }

    /// Create an authenticator with a specific credential hasher.
    pub fn with_hasher(jwt_secret: &[u8], hasher: impl CredentialHasher) -> Self {
        Self {
            hasher: Box::new(hasher),
            jwt_handler: JwtHandler::new(jwt_secret),
            decoy_digest: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest could not be read
    pub fn verify_password(
        &self,
        password: &str,
        stored_digest: &str,
    ) -> Result<(), AuthenticationError> {
        if self.hasher.verify(password, stored_digest)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Run a password check against a throwaway digest.
    ///
    /// Used when no account matches, so that a failed login costs the same
    /// hashing work whether or not the username exists. The outcome is
    /// discarded.
    pub fn verify_decoy(&self, password: &str) {
        let digest = self
            .decoy_digest
            .get_or_init(|| self.hasher.hash(DECOY_PASSWORD).ok());

        if let Some(digest) = digest {
            let _ = self.hasher.verify(password, digest);
        }
    }

    /// Mint a signed access token for `subject` carrying `scopes`, expiring after `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str, scopes: &ScopeSet, ttl: Duration) -> Result<String, JwtError> {
        self.jwt_handler.encode(&Claims::new(subject, scopes, ttl))
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidToken` - Signature, structure or required claims are invalid
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Sign arbitrary claims.
    ///
    /// Lets callers mint tokens whose lifetime is not relative to now.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_verify_password_success() {
        let authenticator = Authenticator::new(SECRET);
        let digest = authenticator.hash_password("admin").unwrap();

        assert!(authenticator.verify_password("admin", &digest).is_ok());
    }

    #[test]
    fn test_verify_password_mismatch() {
        let authenticator = Authenticator::new(SECRET);
        let digest = authenticator.hash_password("admin").unwrap();

        let result = authenticator.verify_password("wrong", &digest);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    struct CountingHasher {
        verifications: Arc<AtomicUsize>,
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
            Ok(format!("plain${}", plaintext))
        }

        fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            Ok(digest == format!("plain${}", plaintext))
        }
    }

    #[test]
    fn test_verify_decoy_spends_a_verification() {
        let verifications = Arc::new(AtomicUsize::new(0));
        let authenticator = Authenticator::with_hasher(
            SECRET,
            CountingHasher {
                verifications: verifications.clone(),
            },
        );

        authenticator.verify_decoy("admin");
        authenticator.verify_decoy("other");

        assert_eq!(verifications.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_issue_and_parse_round_trip() {
        let authenticator = Authenticator::new(SECRET);
        let scopes = ScopeSet::parse("order_read order_write product_read product_write me");

        for ttl in [Duration::seconds(5), Duration::minutes(30), Duration::days(7)] {
            let token = authenticator.issue("admin", &scopes, ttl).unwrap();
            let claims = authenticator.parse(&token).unwrap();

            assert_eq!(claims.sub, "admin");
            assert_eq!(claims.scope_set(), scopes);
        }
    }

    #[test]
    fn test_issue_sets_expiry_from_ttl() {
        let authenticator = Authenticator::new(SECRET);

        let token = authenticator
            .issue("admin", &ScopeSet::new(), Duration::minutes(30))
            .unwrap();
        let claims = authenticator.parse(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_parse_expired_token() {
        let authenticator = Authenticator::new(SECRET);
        let claims = Claims::new("admin", &ScopeSet::parse("me"), Duration::minutes(30))
            .with_expiration(Utc::now().timestamp() - 10);

        let token = authenticator.sign(&claims).unwrap();

        assert!(matches!(
            authenticator.parse(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_parse_token_from_other_key() {
        let issuer = Authenticator::new(b"other_secret_key_at_least_32_bytes");
        let verifier = Authenticator::new(SECRET);

        let token = issuer
            .issue("admin", &ScopeSet::new(), Duration::minutes(1))
            .unwrap();

        assert!(matches!(
            verifier.parse(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_parse_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        assert!(authenticator.parse("invalid.token.here").is_err());
    }
}
