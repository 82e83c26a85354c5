// Row types read from Postgres. Numeric aggregates are cast to float8 in SQL
// so they decode straight into f64.

pub mod genre;
pub mod movie;
pub mod rating;
pub mod recommendation;
pub mod review;
pub mod stats;
pub mod user;
pub mod watch_history;

pub use genre::Genre;
pub use movie::Movie;
pub use rating::MovieRating;
pub use recommendation::RecommendedMovie;
pub use review::MovieReview;
pub use stats::{FilteredMovie, GenreStatistics, TopMovie};
pub use user::{User, UserCredentials};
pub use watch_history::WatchedMovie;
