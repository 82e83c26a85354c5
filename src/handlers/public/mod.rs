// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, the one-time schema bootstrap and service probes.
// Mounted outside the JWT middleware.

pub mod auth;
pub mod system;

pub use auth::{login, register};
pub use system::{health, initialize_database, not_found, root};
