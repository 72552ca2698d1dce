//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the order service:
//! - Password hashing (Argon2id) behind the `CredentialHasher` capability
//! - Signed access tokens carrying OAuth2 scopes (HS256 JWT)
//! - Scope sets with subset checks and `WWW-Authenticate` challenges
//!
//! The service owns user lookup and decides what a failed check means for
//! its callers; this crate only answers "does this password match" and "is
//! this token genuine and unexpired".
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Authenticator, ScopeSet};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let scopes = ScopeSet::parse("order_read me");
//!
//! let token = auth.issue("alice", &scopes, Duration::minutes(30)).unwrap();
//! let claims = auth.parse(&token).unwrap();
//!
//! assert_eq!(claims.sub, "alice");
//! assert!(ScopeSet::parse("me").is_satisfied_by(&claims.scope_set()));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod scopes;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use scopes::ScopeSet;
