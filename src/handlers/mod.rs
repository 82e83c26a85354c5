// handlers/mod.rs - Two-tier handler layout
//
// Public (no token) and Protected (bearer token). Admin-only routes live in
// the protected tier and are gated per handler by the authorization policy.

pub mod protected;
pub mod public;
pub mod validation;
