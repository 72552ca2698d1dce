pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;

/// One-way credential hashing capability.
///
/// `Authenticator` holds one implementation and uses it both to hash new
/// passwords and to verify logins.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce a self-describing digest for a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError>;
}
