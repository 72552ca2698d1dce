use axum::http::StatusCode;
use axum::Extension;

use super::register_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn read_current_user(
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&caller.user).into()))
}
