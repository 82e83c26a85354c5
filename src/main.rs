use clap::Parser;
use tracing_subscriber::EnvFilter;

use filmrec_api::cli::{self, Cli};
use filmrec_api::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and SECURITY_* are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    let config = config::config();
    config.validate()?;
    tracing::info!("Starting Film Recommendation API in {:?} mode", config.environment);
    if filmrec_api::is_development!() {
        tracing::warn!("Running with development defaults; set APP_ENV=production for deployment");
    }

    cli::run(Cli::parse(), config.clone()).await
}
