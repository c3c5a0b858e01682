use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use storefront_service::config::Config;
use storefront_service::domain::admin::service::AdminService;
use storefront_service::domain::product::service::ProductService;
use storefront_service::domain::user::service::UserService;
use storefront_service::inbound::http::router::create_router;
use storefront_service::outbound::repositories::PostgresAdminRepository;
use storefront_service::outbound::repositories::PostgresProductRepository;
use storefront_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "storefront-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let admin_repository = Arc::new(PostgresAdminRepository::new(pg_pool.clone()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool));

    let admin_service = Arc::new(AdminService::new(admin_repository));
    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&product_repository),
    ));
    let product_service = Arc::new(ProductService::new(product_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        admin_service,
        user_service,
        product_service,
        authenticator,
    );
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
