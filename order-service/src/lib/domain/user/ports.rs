use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with the default scopes.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, password and profile
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Ensure an administrator with every scope exists.
    ///
    /// Returns the existing record untouched when the username is taken.
    async fn bootstrap_admin(&self, username: Username, password: String)
        -> Result<User, UserError>;
}

/// Persistence operations for credential records.
///
/// Also serves as the user lookup of the authentication flow.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
