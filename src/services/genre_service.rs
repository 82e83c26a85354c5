use sqlx::PgPool;
use tracing::info;

use crate::database::models::{Genre, Movie};
use crate::database::DatabaseError;

pub struct GenreService {
    pool: PgPool,
}

impl GenreService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_one(&self, genre_name: &str) -> Result<i32, DatabaseError> {
        let (genre_id,): (i32,) = sqlx::query_as("INSERT INTO genres (genre_name) VALUES ($1) RETURNING genre_id")
            .bind(genre_name)
            .fetch_one(&self.pool)
            .await?;

        info!("Created genre {} ({})", genre_id, genre_name);
        Ok(genre_id)
    }

    pub async fn select_all(&self) -> Result<Vec<Genre>, DatabaseError> {
        let genres = sqlx::query_as::<_, Genre>("SELECT genre_id, genre_name FROM genres ORDER BY genre_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    pub async fn select_one(&self, genre_id: i32) -> Result<Option<Genre>, DatabaseError> {
        let genre = sqlx::query_as::<_, Genre>("SELECT genre_id, genre_name FROM genres WHERE genre_id = $1")
            .bind(genre_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    pub async fn update_one(&self, genre_id: i32, genre_name: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE genres SET genre_name = $1 WHERE genre_id = $2")
            .bind(genre_name)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Renamed genre {} to {}", genre_id, genre_name);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Fails with a foreign key violation while the genre is linked to a movie
    pub async fn delete_one(&self, genre_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM genres WHERE genre_id = $1")
            .bind(genre_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted genre {}", genre_id);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Movies linked to a genre; empty for an unknown genre
    pub async fn select_movies(&self, genre_id: i32) -> Result<Vec<Movie>, DatabaseError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT m.movie_id, m.title, m.description, m.duration \
             FROM movies m \
             JOIN movie_genres mg ON m.movie_id = mg.movie_id \
             WHERE mg.genre_id = $1 \
             ORDER BY m.movie_id",
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    /// Duplicate links and unknown ids surface as constraint violations
    pub async fn link_movie(&self, movie_id: i32, genre_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO movie_genres (movie_id, genre_id) VALUES ($1, $2)")
            .bind(movie_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;

        info!("Linked movie {} to genre {}", movie_id, genre_id);
        Ok(())
    }

    pub async fn unlink_movie(&self, movie_id: i32, genre_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1 AND genre_id = $2")
            .bind(movie_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Unlinked movie {} from genre {}", movie_id, genre_id);
        }
        Ok(result.rows_affected() > 0)
    }
}
