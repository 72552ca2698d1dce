use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::COULD_NOT_VALIDATE;
use crate::access::errors::AuthError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Revoke the presented token for the rest of its lifetime.
pub async fn logout(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .revoke(&caller.token)
        .await
        .map_err(|e| match e {
            AuthError::Internal(msg) => ApiError::InternalServerError(msg),
            _ => ApiError::unauthorized(COULD_NOT_VALIDATE, "Bearer"),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
