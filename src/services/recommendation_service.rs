use sqlx::PgPool;
use tracing::info;

use crate::auth::UserId;
use crate::database::models::RecommendedMovie;
use crate::database::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationOutcome {
    Added(i32),
    /// The user already has a watch history row for the movie
    AlreadyWatched,
}

pub struct RecommendationService {
    pool: PgPool,
}

impl RecommendationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The watched check and the insert are one statement, so no separate
    /// read can go stale between them.
    pub async fn create_one(&self, user_id: UserId, movie_id: i32) -> Result<RecommendationOutcome, DatabaseError> {
        let inserted = sqlx::query_scalar::<_, i32>(
            "INSERT INTO recommendations (user_id, movie_id) \
             SELECT $1, $2 \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM watch_history WHERE user_id = $1 AND movie_id = $2 \
             ) \
             RETURNING recommendation_id",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match inserted {
            Some(recommendation_id) => {
                info!("Recommended movie {} to user {}", movie_id, user_id);
                RecommendationOutcome::Added(recommendation_id)
            }
            None => RecommendationOutcome::AlreadyWatched,
        })
    }

    pub async fn select_for_user(&self, user_id: UserId) -> Result<Vec<RecommendedMovie>, DatabaseError> {
        let rows = sqlx::query_as::<_, RecommendedMovie>(
            "SELECT r.recommendation_id, r.movie_id, m.title \
             FROM recommendations r \
             JOIN movies m ON r.movie_id = m.movie_id \
             WHERE r.user_id = $1 \
             ORDER BY r.recommendation_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Removes every recommendation of the movie to the user
    pub async fn delete_one(&self, user_id: UserId, movie_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM recommendations WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Withdrew recommendation of movie {} to user {}", movie_id, user_id);
        }
        Ok(result.rows_affected() > 0)
    }
}
