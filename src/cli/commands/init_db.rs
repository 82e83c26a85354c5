use anyhow::Context;

use crate::auth::password::hash_password_blocking;
use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager, InitOutcome};

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let hash = hash_password_blocking(config.security.admin_password.clone(), config.security.bcrypt_cost).await?;

    match schema::initialize(&pool, &hash).await? {
        InitOutcome::Created => println!("Database and tables initialized successfully with relationships!"),
        InitOutcome::AlreadyInitialized => println!("Database has already been initialized!"),
    }

    pool.close().await;
    Ok(())
}
