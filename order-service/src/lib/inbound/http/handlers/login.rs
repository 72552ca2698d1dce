use auth::ScopeSet;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::INCORRECT_CREDENTIALS;
use crate::access::errors::AuthError;
use crate::access::models::AccessToken;
use crate::access::models::LoginCommand;
use crate::inbound::http::router::AppState;

/// OAuth2 password grant.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    let username = form.username.clone();

    state
        .auth_service
        .login(form.into_command())
        .await
        .map_err(|e| match e {
            AuthError::Internal(msg) => ApiError::InternalServerError(msg),
            other => {
                tracing::info!(user = %username, "Login rejected: {}", other);
                ApiError::unauthorized(INCORRECT_CREDENTIALS, "Bearer")
            }
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}

/// `application/x-www-form-urlencoded` login form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    grant_type: Option<String>,
}

impl LoginForm {
    fn into_command(self) -> LoginCommand {
        let command = LoginCommand::new(self.username, self.password);
        match self.scope.filter(|scope| !scope.trim().is_empty()) {
            Some(scope) => command.with_requested_scopes(ScopeSet::parse(&scope)),
            None => command,
        }
    }
}
