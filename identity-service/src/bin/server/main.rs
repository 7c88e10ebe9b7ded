use std::sync::Arc;

use auth::Authenticator;
use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::account::service::AccountService;
use identity_service::domain::session::service::SessionManager;
use identity_service::domain::user::hashing::PasswordWorkers;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::session::PostgresSessionStore;
use identity_service::outbound::repositories::user::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        store_timeout_ms = config.store.timeout_ms,
        session_ttl_hours = config.session.ttl_hours,
        hashing_memory_kib = config.password.memory_kib,
        hashing_iterations = config.password.iterations,
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

    let authenticator = Authenticator::new(config.password.cost())?;
    let workers = PasswordWorkers::new(
        authenticator,
        config.password.max_concurrent,
        config.password.timeout(),
    );
    let issuer = TokenIssuer::new(config.session.secret.as_bytes())?;

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let session_store = Arc::new(PostgresSessionStore::new(pg_pool));

    let sessions = Arc::new(SessionManager::new(
        session_store,
        issuer,
        config.session.ttl(),
        config.store.timeout(),
    ));
    let account_service = Arc::new(AccountService::new(
        credential_store,
        Arc::clone(&sessions),
        workers,
        config.store.timeout(),
    ));

    let purge_interval = config.session.purge_interval();
    let purge_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(purge_interval);
        loop {
            interval.tick().await;
            if let Err(e) = sessions.purge_expired().await {
                tracing::warn!(error = %e, "Expired session purge failed");
            }
        }
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, config.session.cookie_name.clone());
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    purge_task.abort();
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
