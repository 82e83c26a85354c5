use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::password::DecoyHash;
use crate::auth::JwtKeys;
use crate::config::AppConfig;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    /// Verified against on logins with an unknown email
    pub login_decoy: DecoyHash,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let jwt = JwtKeys::from_config(&config.security);
        Self {
            pool,
            config: Arc::new(config),
            jwt,
            login_decoy: DecoyHash::default(),
        }
    }
}
