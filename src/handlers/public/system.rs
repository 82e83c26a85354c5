// handlers/public/system.rs - GET /, GET /health, GET /initialize-database

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::auth::password::hash_password_blocking;
use crate::database::{schema, DatabaseManager, InitOutcome};
use crate::error::{ApiError, ErrorBody};
use crate::middleware::{message, ApiResponse, ApiResult, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// GET / - banner listing the endpoint groups
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner")),
    tag = "System"
)]
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Film Recommendation Project API",
        "message": "Welcome to the Film Recommendation Project API!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": ["/register", "/login", "/initialize-database", "/health", "/openapi.json"],
            "users": ["/users", "/users/:id"],
            "catalogue": ["/movies", "/movies/:id", "/genres", "/genres/:id", "/movie-genre"],
            "activity": ["/ratings", "/reviews", "/watch-history", "/recommendations"],
            "statistics": ["/movies/filter", "/movies/top", "/genres/statistics", "/genres/top-rated-movie"]
        }
    }))
}

/// GET /health - 503 while the database is unreachable
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = ErrorBody),
    ),
    tag = "System"
)]
pub async fn health(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    if let Err(e) = DatabaseManager::health_check(&state.pool).await {
        error!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable("Database unavailable"));
    }

    Ok(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /initialize-database - create the schema and seed the admin account once
#[utoipa::path(
    get,
    path = "/initialize-database",
    responses(
        (status = 200, description = "Schema created", body = MessageResponse),
        (status = 403, description = "Schema already exists", body = ErrorBody),
    ),
    tag = "System"
)]
pub async fn initialize_database(State(state): State<AppState>) -> ApiResult<MessageResponse> {
    if schema::is_initialized(&state.pool).await? {
        return Err(ApiError::forbidden("Database has already been initialized!"));
    }

    let security = &state.config.security;
    let admin_hash = hash_password_blocking(security.admin_password.clone(), security.bcrypt_cost).await?;

    match schema::initialize(&state.pool, &admin_hash).await? {
        InitOutcome::Created => {
            info!("Database initialized via HTTP");
            Ok(message("Database and tables initialized successfully with relationships!"))
        }
        InitOutcome::AlreadyInitialized => Err(ApiError::forbidden("Database has already been initialized!")),
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, axum::Json<Value>) {
    let err = ApiError::not_found("Route not found");
    (err.status_code(), axum::Json(err.to_json()))
}
