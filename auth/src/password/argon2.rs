use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::CredentialHasher;

/// Argon2id credential hasher.
///
/// Digests are PHC strings, so the algorithm parameters and salt travel with
/// the stored value and old digests stay verifiable if the defaults change.
#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC digest.
    ///
    /// # Errors
    /// * `MalformedDigest` - Stored value is not a parseable PHC string
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedDigest(e.to_string())),
        }
    }
}

impl CredentialHasher for PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, plaintext)
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
        PasswordHasher::verify(self, plaintext, digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();

        let digest = hasher.hash("admin").expect("Failed to hash password");
        assert!(digest.starts_with("$argon2id$"));

        assert!(hasher.verify("admin", &digest).expect("Failed to verify"));
        assert!(!hasher.verify("wrong", &digest).expect("Failed to verify"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("admin").unwrap();
        let second = hasher.hash("admin").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_digest() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("admin", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedDigest(_))));
    }

    #[test]
    fn test_usable_through_trait_object() {
        let hasher: Box<dyn CredentialHasher> = Box::new(PasswordHasher::new());

        let digest = hasher.hash("user").unwrap();
        assert!(hasher.verify("user", &digest).unwrap());
    }
}
