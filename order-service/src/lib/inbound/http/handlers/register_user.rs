use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    username: String,
    password: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        let username = Username::new(self.username)?;
        let mut command = RegisterUserCommand::new(username, self.password);

        if let Some(email) = self.email {
            command = command.with_email(EmailAddress::new(email)?);
        }
        if let Some(full_name) = self.full_name {
            command = command.with_full_name(full_name);
        }

        Ok(command)
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Public view of a credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
    pub scopes: Vec<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            email: user.email.as_ref().map(|e| e.as_str().to_string()),
            full_name: user.full_name.clone(),
            disabled: user.disabled,
            scopes: user.scopes.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_profile() {
        let request = RegisterUserRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
            email: Some("alice@example.com".to_string()),
            full_name: Some("Alice Liddell".to_string()),
        };

        let command = request.try_into_command().unwrap();
        assert_eq!(command.username.as_str(), "alice");
        assert_eq!(
            command.email.map(|e| e.as_str().to_string()),
            Some("alice@example.com".to_string())
        );
        assert_eq!(command.full_name.as_deref(), Some("Alice Liddell"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = RegisterUserRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
            email: Some("not-an-email".to_string()),
            full_name: None,
        };

        let error = ApiError::from(request.try_into_command().unwrap_err());
        assert!(matches!(error, ApiError::UnprocessableEntity(_)));
    }
}
