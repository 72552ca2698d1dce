use std::sync::Arc;

use auth::Authenticator;
use auth::ScopeSet;
use chrono::Duration;
use chrono::Utc;
use order_service::access::service::AuthService;
use order_service::inbound::http::router::create_router;
use order_service::inbound::http::router::AppState;
use order_service::order::service::OrderService;
use order_service::outbound::repositories::InMemoryOrderRepository;
use order_service::outbound::repositories::InMemoryProductRepository;
use order_service::outbound::repositories::InMemoryUserRepository;
use order_service::outbound::revocation::InMemoryTokenDenylist;
use order_service::product::service::ProductService;
use order_service::user::models::User;
use order_service::user::models::Username;
use order_service::user::ports::UserRepository;
use order_service::user::service::UserService;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub const ADMIN_SCOPES: &str = "order_read order_write product_read product_write me";
pub const USER_SCOPES: &str = "order_read product_read";

/// Test application that spawns a real server backed by in-memory storage.
///
/// Seeded accounts:
/// * `admin` / `admin` with [`ADMIN_SCOPES`]
/// * `user` / `user` with [`USER_SCOPES`]
/// * `ghost` / `ghost`, disabled, with `me`
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let users = Arc::new(InMemoryUserRepository::new());

        for (username, scopes, disabled) in [
            ("admin", ADMIN_SCOPES, false),
            ("user", USER_SCOPES, false),
            ("ghost", "me", true),
        ] {
            users
                .create(User {
                    username: Username::new(username.to_string()).unwrap(),
                    email: None,
                    full_name: None,
                    password_hash: authenticator.hash_password(username).unwrap(),
                    scopes: ScopeSet::parse(scopes),
                    disabled,
                    created_at: Utc::now(),
                })
                .await
                .expect("Failed to seed user");
        }

        let state = AppState::new(
            AuthService::new(
                users.clone(),
                Arc::new(InMemoryTokenDenylist::new()),
                authenticator.clone(),
                Duration::minutes(30),
            ),
            UserService::new(users, authenticator.clone()),
            ProductService::new(Arc::new(InMemoryProductRepository::new())),
            OrderService::new(Arc::new(InMemoryOrderRepository::new())),
        );

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Submit the password form to `/auth/token`.
    pub async fn request_token(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.post("/auth/token")
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request_token(&[("username", username), ("password", password)])
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}

/// Read the `detail` of an error response.
pub async fn detail(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["detail"].as_str().unwrap_or_default().to_string()
}

/// Read the `WWW-Authenticate` header of a response.
pub fn challenge(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::WWW_AUTHENTICATE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
