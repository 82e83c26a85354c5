//! Read-only aggregate queries over movies, genres and ratings.
//!
//! Unrated movies average to 0 everywhere except the genre statistics, where
//! a genre with no ratings reports a null average.

use sqlx::PgPool;

use crate::database::models::{FilteredMovie, Genre, GenreStatistics, TopMovie};
use crate::database::DatabaseError;

#[derive(Debug, Clone)]
pub struct MovieFilter<'a> {
    pub genre_name: &'a str,
    /// Inclusive bounds on duration in minutes
    pub min_duration: i32,
    pub max_duration: i32,
    /// Applied to the per-movie average after grouping
    pub min_rating: f64,
}

pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn filter_movies(&self, filter: &MovieFilter<'_>) -> Result<Vec<FilteredMovie>, DatabaseError> {
        let movies = sqlx::query_as::<_, FilteredMovie>(
            "SELECT m.movie_id, m.title, m.description, m.duration, \
                    COALESCE(AVG(r.score), 0)::float8 AS avg_rating \
             FROM movies m \
             JOIN movie_genres mg ON m.movie_id = mg.movie_id \
             JOIN genres g ON mg.genre_id = g.genre_id \
             LEFT JOIN ratings r ON m.movie_id = r.movie_id \
             WHERE g.genre_name = $1 \
               AND m.duration BETWEEN $2 AND $3 \
             GROUP BY m.movie_id \
             HAVING COALESCE(AVG(r.score), 0)::float8 >= $4 \
             ORDER BY m.movie_id",
        )
        .bind(filter.genre_name)
        .bind(filter.min_duration)
        .bind(filter.max_duration)
        .bind(filter.min_rating)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    /// Highest average first; equal averages keep the lower movie id first
    pub async fn top_movies(&self, genre_name: &str, limit: i64) -> Result<Vec<TopMovie>, DatabaseError> {
        let movies = sqlx::query_as::<_, TopMovie>(
            "SELECT m.movie_id, m.title, m.description, \
                    COALESCE(AVG(r.score), 0)::float8 AS rating \
             FROM movies m \
             JOIN movie_genres mg ON m.movie_id = mg.movie_id \
             JOIN genres g ON mg.genre_id = g.genre_id \
             LEFT JOIN ratings r ON m.movie_id = r.movie_id \
             WHERE g.genre_name = $1 \
             GROUP BY m.movie_id \
             ORDER BY rating DESC, m.movie_id ASC \
             LIMIT $2",
        )
        .bind(genre_name)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    pub async fn genre_statistics(&self) -> Result<Vec<GenreStatistics>, DatabaseError> {
        let stats = sqlx::query_as::<_, GenreStatistics>(
            "SELECT g.genre_name, \
                    COUNT(DISTINCT mg.movie_id) AS movie_count, \
                    ROUND(AVG(r.score), 2)::float8 AS avg_rating \
             FROM genres g \
             LEFT JOIN movie_genres mg ON g.genre_id = mg.genre_id \
             LEFT JOIN ratings r ON mg.movie_id = r.movie_id \
             GROUP BY g.genre_id, g.genre_name \
             ORDER BY movie_count DESC, g.genre_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }

    /// Genres of every movie sharing the highest average rating
    pub async fn top_rated_movie_genres(&self) -> Result<Vec<Genre>, DatabaseError> {
        let genres = sqlx::query_as::<_, Genre>(
            "WITH movie_avg AS ( \
                 SELECT m.movie_id, COALESCE(AVG(r.score), 0) AS avg_rating \
                 FROM movies m \
                 LEFT JOIN ratings r ON m.movie_id = r.movie_id \
                 GROUP BY m.movie_id \
             ) \
             SELECT DISTINCT g.genre_id, g.genre_name \
             FROM genres g \
             JOIN movie_genres mg ON g.genre_id = mg.genre_id \
             JOIN movie_avg a ON a.movie_id = mg.movie_id \
             WHERE a.avg_rating = (SELECT MAX(avg_rating) FROM movie_avg) \
             ORDER BY g.genre_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }
}
