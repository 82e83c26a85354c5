use sqlx::PgPool;
use tracing::info;

use crate::auth::UserId;
use crate::database::models::MovieReview;
use crate::database::DatabaseError;

pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_one(&self, user_id: UserId, movie_id: i32, review_text: &str) -> Result<i32, DatabaseError> {
        let (review_id,): (i32,) = sqlx::query_as(
            "INSERT INTO reviews (user_id, movie_id, review_text) VALUES ($1, $2, $3) RETURNING review_id",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(review_text)
        .fetch_one(&self.pool)
        .await?;

        info!("User {} reviewed movie {} (review {})", user_id, movie_id, review_id);
        Ok(review_id)
    }

    pub async fn select_for_movie(&self, movie_id: i32) -> Result<Vec<MovieReview>, DatabaseError> {
        let reviews = sqlx::query_as::<_, MovieReview>(
            "SELECT r.review_id, r.user_id, r.review_text, u.user_name \
             FROM reviews r \
             JOIN users u ON r.user_id = u.user_id \
             WHERE r.movie_id = $1 \
             ORDER BY r.review_id",
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    pub async fn select_owner(&self, review_id: i32) -> Result<Option<UserId>, DatabaseError> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM reviews WHERE review_id = $1")
            .bind(review_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    pub async fn update_one(&self, review_id: i32, review_text: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE reviews SET review_text = $1 WHERE review_id = $2")
            .bind(review_text)
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Updated review {}", review_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_one(&self, review_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted review {}", review_id);
        }
        Ok(result.rows_affected() > 0)
    }
}
