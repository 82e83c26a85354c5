use anyhow::Context;
use tracing::info;

use crate::auth::password::hash_password_blocking;
use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager, InitOutcome};
use crate::state::AppState;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }

    info!("Connecting to {}", config.redacted_database_url());
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.auto_initialize {
        let hash = hash_password_blocking(config.security.admin_password.clone(), config.security.bcrypt_cost).await?;
        match schema::initialize(&pool, &hash).await? {
            InitOutcome::Created => info!("Database initialized at startup"),
            InitOutcome::AlreadyInitialized => info!("Database already initialized"),
        }
    }

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    let app = crate::app(AppState::new(pool, config));

    info!("Film Recommendation API listening on http://{}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
