// One service per table (or aggregate family). Each holds a pool handle and
// issues one or two parameterized statements per call.

pub mod genre_service;
pub mod movie_service;
pub mod rating_service;
pub mod recommendation_service;
pub mod review_service;
pub mod stats_service;
pub mod user_service;
pub mod watch_history_service;

pub use genre_service::GenreService;
pub use movie_service::MovieService;
pub use rating_service::RatingService;
pub use recommendation_service::{RecommendationOutcome, RecommendationService};
pub use review_service::ReviewService;
pub use stats_service::{MovieFilter, StatsService};
pub use user_service::UserService;
pub use watch_history_service::WatchHistoryService;
