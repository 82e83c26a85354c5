pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use response::{message, ApiResponse, ApiResult, MessageResponse};
