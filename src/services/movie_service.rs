use sqlx::PgPool;
use tracing::info;

use crate::database::models::{Genre, Movie};
use crate::database::DatabaseError;

#[derive(Debug, Clone)]
pub struct MovieFields<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub duration: Option<i32>,
}

pub struct MovieService {
    pool: PgPool,
}

impl MovieService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_one(&self, fields: &MovieFields<'_>) -> Result<i32, DatabaseError> {
        let (movie_id,): (i32,) = sqlx::query_as(
            "INSERT INTO movies (title, description, duration) VALUES ($1, $2, $3) RETURNING movie_id",
        )
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.duration)
        .fetch_one(&self.pool)
        .await?;

        info!("Created movie {}", movie_id);
        Ok(movie_id)
    }

    pub async fn select_all(&self) -> Result<Vec<Movie>, DatabaseError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT movie_id, title, description, duration FROM movies ORDER BY movie_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    pub async fn select_one(&self, movie_id: i32) -> Result<Option<Movie>, DatabaseError> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT movie_id, title, description, duration FROM movies WHERE movie_id = $1",
        )
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(movie)
    }

    pub async fn update_one(&self, movie_id: i32, fields: &MovieFields<'_>) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE movies SET title = $1, description = $2, duration = $3 WHERE movie_id = $4",
        )
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.duration)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!("Updated movie {}", movie_id);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Fails with a foreign key violation while any dependent row references the movie
    pub async fn delete_one(&self, movie_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM movies WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted movie {}", movie_id);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Genres linked to a movie; empty for an unknown movie
    pub async fn select_genres(&self, movie_id: i32) -> Result<Vec<Genre>, DatabaseError> {
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT g.genre_id, g.genre_name \
             FROM genres g \
             JOIN movie_genres mg ON g.genre_id = mg.genre_id \
             WHERE mg.movie_id = $1 \
             ORDER BY g.genre_id",
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }
}
