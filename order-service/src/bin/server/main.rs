use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use order_service::access::ports::TokenDenylist;
use order_service::access::service::AuthService;
use order_service::config::Config;
use order_service::inbound::http::router::create_router;
use order_service::inbound::http::router::AppState;
use order_service::order::ports::OrderRepository;
use order_service::order::service::OrderService;
use order_service::outbound::repositories::InMemoryOrderRepository;
use order_service::outbound::repositories::InMemoryProductRepository;
use order_service::outbound::repositories::InMemoryUserRepository;
use order_service::outbound::repositories::PostgresOrderRepository;
use order_service::outbound::repositories::PostgresProductRepository;
use order_service::outbound::repositories::PostgresUserRepository;
use order_service::outbound::revocation::InMemoryTokenDenylist;
use order_service::product::ports::ProductRepository;
use order_service::product::service::ProductService;
use order_service::user::models::Username;
use order_service::user::ports::UserRepository;
use order_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "order-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let persistence = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        persistence,
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let denylist = Arc::new(InMemoryTokenDenylist::new());

    let state = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_state(
                &config,
                authenticator,
                denylist,
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresProductRepository::new(pg_pool.clone())),
                Arc::new(PostgresOrderRepository::new(pg_pool)),
            )
        }
        None => {
            tracing::warn!("No database configured, data is kept in memory");
            build_state(
                &config,
                authenticator,
                denylist,
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryProductRepository::new()),
                Arc::new(InMemoryOrderRepository::new()),
            )
        }
    };

    if let (Some(username), Some(password)) = (
        config.bootstrap.admin_username.clone(),
        config.bootstrap.admin_password.clone(),
    ) {
        state
            .user_service
            .bootstrap_admin(Username::new(username)?, password)
            .await?;
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

fn build_state<UR, PR, OR, TD>(
    config: &Config,
    authenticator: Arc<Authenticator>,
    denylist: Arc<TD>,
    users: Arc<UR>,
    products: Arc<PR>,
    orders: Arc<OR>,
) -> AppState
where
    UR: UserRepository,
    PR: ProductRepository,
    OR: OrderRepository,
    TD: TokenDenylist,
{
    AppState::new(
        AuthService::new(
            Arc::clone(&users),
            denylist,
            Arc::clone(&authenticator),
            Duration::minutes(config.jwt.expiration_minutes),
        ),
        UserService::new(users, authenticator),
        ProductService::new(products),
        OrderService::new(orders),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
