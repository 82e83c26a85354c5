use sqlx::PgPool;
use tracing::info;

use crate::auth::UserId;
use crate::database::models::WatchedMovie;
use crate::database::DatabaseError;

/// Append-only per-user viewing log
pub struct WatchHistoryService {
    pool: PgPool,
}

impl WatchHistoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_one(&self, user_id: UserId, movie_id: i32) -> Result<i32, DatabaseError> {
        let (history_id,): (i32,) = sqlx::query_as(
            "INSERT INTO watch_history (user_id, movie_id) VALUES ($1, $2) RETURNING history_id",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await?;

        info!("User {} watched movie {}", user_id, movie_id);
        Ok(history_id)
    }

    pub async fn select_for_user(&self, user_id: UserId) -> Result<Vec<WatchedMovie>, DatabaseError> {
        let entries = sqlx::query_as::<_, WatchedMovie>(
            "SELECT wh.history_id, wh.movie_id, m.title \
             FROM watch_history wh \
             JOIN movies m ON wh.movie_id = m.movie_id \
             WHERE wh.user_id = $1 \
             ORDER BY wh.history_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
