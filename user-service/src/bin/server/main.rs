use std::sync::Arc;

use auth::Authenticator;
use auth::TokenSettings;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
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
        jwt_issuer = %config.jwt.issuer,
        password_algorithm = ?config.password.algorithm,
        "Configuration loaded"
    );

    let settings = TokenSettings::new(config.jwt.secret.as_bytes(), config.jwt.issuer.as_str())?;
    let authenticator = Arc::new(Authenticator::with_hasher(
        &settings,
        config.password.algorithm.hasher(),
    ));

    let user_service: Arc<dyn UserServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(UserService::new(user_repository, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            let user_repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(user_repository, Arc::clone(&authenticator)))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
