use auth::ScopeSet;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::access::errors::AuthError;
use crate::order::errors::OrderError;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;

pub mod create_order;
pub mod create_product;
pub mod delete_product;
pub mod get_order;
pub mod get_product;
pub mod list_my_orders;
pub mod list_orders;
pub mod list_products;
pub mod login;
pub mod logout;
pub mod read_current_user;
pub mod register_user;
pub mod update_product;

pub const COULD_NOT_VALIDATE: &str = "Could not validate credentials";
pub const INCORRECT_CREDENTIALS: &str = "Incorrect username or password";
pub const INACTIVE_USER: &str = "Inactive user";
pub const NOT_ENOUGH_PERMISSIONS: &str = "Not enough permissions";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    /// Rendered with a `WWW-Authenticate` header carrying `challenge`.
    Unauthorized { detail: String, challenge: String },
}

impl ApiError {
    pub fn unauthorized(detail: impl Into<String>, challenge: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
            challenge: challenge.into(),
        }
    }

    /// Denial of a guarded route requiring `required`.
    ///
    /// Unknown subjects are reported exactly like invalid tokens.
    pub fn access_denied(err: AuthError, required: &ScopeSet) -> Self {
        let challenge = required.challenge();
        match err {
            AuthError::InvalidToken(_)
            | AuthError::UserNotFound(_)
            | AuthError::IncorrectPassword => Self::unauthorized(COULD_NOT_VALIDATE, challenge),
            AuthError::InactiveAccount(_) => Self::unauthorized(INACTIVE_USER, challenge),
            AuthError::InsufficientScope { required, .. } => {
                Self::unauthorized(NOT_ENOUGH_PERMISSIONS, required.challenge())
            }
            AuthError::Internal(e) => Self::InternalServerError(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail, challenge) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Unauthorized { detail, challenge } => {
                (StatusCode::UNAUTHORIZED, detail, Some(challenge))
            }
        };

        let body = Json(ApiErrorBody { detail });
        match challenge {
            Some(challenge) => {
                (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response()
            }
            None => (status, body).into_response(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByUsername(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ProductError::AlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            ProductError::InvalidSku(_) | ProductError::InvalidPrice(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            ProductError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => ApiError::NotFound(err.to_string()),
            OrderError::InvalidSku(_)
            | OrderError::InvalidPrice(_)
            | OrderError::InvalidQuantity(_)
            | OrderError::InvalidStatus(_)
            | OrderError::EmptyOrder => ApiError::UnprocessableEntity(err.to_string()),
            OrderError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}
