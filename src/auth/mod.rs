pub mod password;
pub mod policy;

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Surrogate key of a row in `users`
pub type UserId = i32;

/// The distinguished administrator row, seeded at initialization
pub const ADMIN_USER_ID: UserId = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id rendered as a string
    pub sub: String,
    pub user_id: UserId,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: UserId, expiry_hours: u64) -> Self {
        let iat = Utc::now().timestamp();

        Self {
            sub: user_id.to_string(),
            user_id,
            exp: iat.saturating_add(lifetime_secs(expiry_hours)),
            iat,
        }
    }
}

/// Saturates instead of overflowing; config validation keeps real values small
fn lifetime_secs(expiry_hours: u64) -> i64 {
    i64::try_from(expiry_hours).unwrap_or(i64::MAX).saturating_mul(3600)
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization token is missing")]
    Missing,

    #[error("authorization token is malformed")]
    Malformed,

    #[error("authorization token has expired")]
    Expired,

    #[error("authorization token signature is invalid")]
    SignatureInvalid,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// HS256 signing and verification keys derived from the server secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Lifetime of issued tokens in seconds
    pub fn expires_in(&self) -> i64 {
        lifetime_secs(self.expiry_hours)
    }

    /// Issue a token for `user_id` expiring `expiry_hours` from now
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        self.encode_claims(&Claims::new(user_id, self.expiry_hours))
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
            _ => AuthError::Malformed,
        })?;

        // The string subject and the numeric id must agree
        if data.claims.sub.parse::<UserId>().ok() != Some(data.claims.user_id) {
            return Err(AuthError::Malformed);
        }

        Ok(data.claims)
    }
}
