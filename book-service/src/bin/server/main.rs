use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use auth::TokenEngine;
use book_service::config::Config;
use book_service::inbound::http::router::create_router;
use book_service::library::service::LibraryService;
use book_service::outbound::credentials::Argon2CredentialHasher;
use book_service::outbound::credentials::JwtTokenIssuer;
use book_service::outbound::repositories::PostgresDocumentStore;
use book_service::outbound::storage::GofileStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "book-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_upload_bytes = config.server.max_upload_bytes,
        storage_api = %config.storage.api_url,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_engine = Arc::new(TokenEngine::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.access_token_ttl_minutes),
        chrono::Duration::hours(config.jwt.refresh_token_ttl_hours),
    ));
    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;

    let document_store = Arc::new(PostgresDocumentStore::new(
        pg_pool,
        Duration::from_secs(config.database.operation_timeout_secs),
    ));
    let file_storage = Arc::new(GofileStorage::new(config.storage.clone())?);

    let library_service = Arc::new(LibraryService::new(
        document_store,
        file_storage,
        Arc::new(Argon2CredentialHasher::new(password_hasher)),
        Arc::new(JwtTokenIssuer::new(Arc::clone(&token_engine))),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        library_service,
        token_engine,
        config.server.max_upload_bytes,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
