use std::sync::Arc;
use std::time::Duration;

use auth::ScopeSet;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_order::create_order;
use super::handlers::create_product::create_product;
use super::handlers::delete_product::delete_product;
use super::handlers::get_order::get_order;
use super::handlers::get_product::get_product;
use super::handlers::list_my_orders::list_my_orders;
use super::handlers::list_orders::list_orders;
use super::handlers::list_products::list_products;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::read_current_user::read_current_user;
use super::handlers::register_user::register_user;
use super::handlers::update_product::update_product;
use super::middleware::authorize;
use super::middleware::ScopeGuard;
use crate::access::models::SCOPE_ME;
use crate::access::models::SCOPE_ORDER_READ;
use crate::access::models::SCOPE_ORDER_WRITE;
use crate::access::models::SCOPE_PRODUCT_READ;
use crate::access::models::SCOPE_PRODUCT_WRITE;
use crate::access::models::SCOPE_USER_ORDER_READ;
use crate::access::ports::AuthServicePort;
use crate::order::ports::OrderServicePort;
use crate::product::ports::ProductServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub order_service: Arc<dyn OrderServicePort>,
}

impl AppState {
    pub fn new(
        auth_service: impl AuthServicePort,
        user_service: impl UserServicePort,
        product_service: impl ProductServicePort,
        order_service: impl OrderServicePort,
    ) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            product_service: Arc::new(product_service),
            order_service: Arc::new(order_service),
        }
    }

    /// Guard requiring every scope in `scopes` (space separated).
    fn guard(&self, scopes: &str) -> ScopeGuard {
        ScopeGuard::new(self.auth_service.clone(), ScopeSet::parse(scopes))
    }
}

/// Attach a scope guard to every route of `routes`.
fn require(routes: Router<AppState>, state: &AppState, scopes: &str) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(
        state.guard(scopes),
        authorize,
    ))
}

pub fn create_router(state: AppState) -> Router {
    let public_routes: Router<AppState> = Router::new()
        .route("/auth/token", post(login))
        .route("/auth/users", post(register_user));

    let authenticated_routes = require(
        Router::new().route("/auth/logout", post(logout)),
        &state,
        "",
    );

    let me_routes = require(
        Router::new().route("/auth/users/me", get(read_current_user)),
        &state,
        SCOPE_ME,
    );

    let product_read_routes = require(
        Router::new()
            .route("/products", get(list_products))
            .route("/products/:sku", get(get_product)),
        &state,
        SCOPE_PRODUCT_READ,
    );

    let product_write_routes = require(
        Router::new()
            .route("/products", post(create_product))
            .route("/products/:sku", put(update_product).delete(delete_product)),
        &state,
        SCOPE_PRODUCT_WRITE,
    );

    let order_read_routes = require(
        Router::new()
            .route("/orders", get(list_orders))
            .route("/orders/:order_id", get(get_order)),
        &state,
        SCOPE_ORDER_READ,
    );

    let user_order_routes = require(
        Router::new().route("/orders/mine", get(list_my_orders)),
        &state,
        SCOPE_USER_ORDER_READ,
    );

    let order_write_routes = require(
        Router::new().route("/orders", post(create_order)),
        &state,
        SCOPE_ORDER_WRITE,
    );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(me_routes)
        .merge(product_read_routes)
        .merge(product_write_routes)
        .merge(order_read_routes)
        .merge(user_order_routes)
        .merge(order_write_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
