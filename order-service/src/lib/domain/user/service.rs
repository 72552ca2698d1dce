use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::ScopeSet;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::models::ADMIN_SCOPES;
use crate::domain::user::models::DEFAULT_USER_SCOPES;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hashes passwords with the same hasher login verifies against
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            scopes: ScopeSet::parse(DEFAULT_USER_SCOPES),
            disabled: false,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!("Registered user {}", created_user.username);

        Ok(created_user)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn bootstrap_admin(
        &self,
        username: Username,
        password: String,
    ) -> Result<User, UserError> {
        if let Some(existing) = self.repository.find_by_username(&username).await? {
            tracing::debug!("Administrator {} already present", existing.username);
            return Ok(existing);
        }

        let admin = User {
            username,
            email: None,
            full_name: None,
            password_hash: self.authenticator.hash_password(&password)?,
            scopes: ScopeSet::parse(ADMIN_SCOPES),
            disabled: false,
            created_at: Utc::now(),
        };

        let created_admin = self.repository.create(admin).await?;
        tracing::info!("Created administrator {}", created_admin.username);

        Ok(created_admin)
    }
}
