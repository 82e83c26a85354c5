use sqlx::PgPool;
use tracing::info;

use crate::auth::UserId;
use crate::database::models::MovieRating;
use crate::database::DatabaseError;

pub struct RatingService {
    pool: PgPool,
}

impl RatingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_one(&self, user_id: UserId, movie_id: i32, score: f64) -> Result<i32, DatabaseError> {
        let (rating_id,): (i32,) = sqlx::query_as(
            "INSERT INTO ratings (user_id, movie_id, score) VALUES ($1, $2, $3::numeric) RETURNING rating_id",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        info!("User {} rated movie {} (rating {})", user_id, movie_id, rating_id);
        Ok(rating_id)
    }

    pub async fn select_for_movie(&self, movie_id: i32) -> Result<Vec<MovieRating>, DatabaseError> {
        let ratings = sqlx::query_as::<_, MovieRating>(
            "SELECT r.rating_id, r.user_id, r.score::float8 AS score, u.user_name \
             FROM ratings r \
             JOIN users u ON r.user_id = u.user_id \
             WHERE r.movie_id = $1 \
             ORDER BY r.rating_id",
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ratings)
    }

    /// The user who wrote the rating, or None if it does not exist
    pub async fn select_owner(&self, rating_id: i32) -> Result<Option<UserId>, DatabaseError> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM ratings WHERE rating_id = $1")
            .bind(rating_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    pub async fn update_one(&self, rating_id: i32, score: f64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE ratings SET score = $1::numeric WHERE rating_id = $2")
            .bind(score)
            .bind(rating_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Updated rating {}", rating_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_one(&self, rating_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM ratings WHERE rating_id = $1")
            .bind(rating_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted rating {}", rating_id);
        }
        Ok(result.rows_affected() > 0)
    }
}
