use std::sync::Arc;

use auth::ScopeSet;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::COULD_NOT_VALIDATE;
use crate::access::ports::AuthServicePort;
use crate::user::models::User;

/// Caller resolved by the scope guard, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// Raw bearer token the caller presented.
    pub token: String,
}

/// Scopes a group of routes requires, with the service that checks them.
#[derive(Clone)]
pub struct ScopeGuard {
    auth_service: Arc<dyn AuthServicePort>,
    required: ScopeSet,
}

impl ScopeGuard {
    pub fn new(auth_service: Arc<dyn AuthServicePort>, required: ScopeSet) -> Self {
        Self {
            auth_service,
            required,
        }
    }
}

/// Middleware that authorizes the bearer token against the guard's scopes
/// and adds the caller to request extensions.
pub async fn authorize(
    State(guard): State<ScopeGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)
        .ok_or_else(|| ApiError::unauthorized(COULD_NOT_VALIDATE, guard.required.challenge()))?
        .to_string();

    let user = guard
        .auth_service
        .authorize(&token, &guard.required)
        .await
        .map_err(|e| {
            tracing::warn!(required = %guard.required, "Access denied: {}", e);
            ApiError::access_denied(e, &guard.required)
        })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user, token });

    Ok(next.run(req).await)
}

/// Token after a case-insensitive `Bearer` scheme, taken verbatim.
fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    use super::*;

    fn request_with(authorization: Option<&str>) -> Request {
        let mut builder = HttpRequest::builder().uri("/auth/users/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let req = request_with(Some("bearer abc"));
        assert_eq!(extract_bearer_token(&req), Some("abc"));
    }

    #[test]
    fn test_token_is_not_trimmed() {
        let req = request_with(Some("Bearer  abc"));
        assert_eq!(extract_bearer_token(&req), Some(" abc"));
    }

    #[test]
    fn test_missing_or_foreign_scheme() {
        assert_eq!(extract_bearer_token(&request_with(None)), None);
        assert_eq!(
            extract_bearer_token(&request_with(Some("Basic YWRtaW46YWRtaW4="))),
            None
        );
        assert_eq!(extract_bearer_token(&request_with(Some("Bearer"))), None);
    }
}
