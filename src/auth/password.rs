//! Salted one-way password hashing.
//!
//! bcrypt is CPU bound, so the async wrappers run it on the blocking pool.

use std::sync::Arc;

use tokio::sync::OnceCell;

/// Plaintext behind the decoy hash; never stored
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Constant-time comparison against a stored bcrypt hash.
/// An unparseable stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(password, stored_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

pub async fn verify_password_blocking(password: String, stored_hash: String) -> Result<bool, PasswordError> {
    Ok(tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?)
}

/// A hash to verify against when no account matches the login email, so
/// unknown and known emails cost the same bcrypt work. Built on first use at
/// the configured cost and shared by every clone.
#[derive(Debug, Clone, Default)]
pub struct DecoyHash(Arc<OnceCell<String>>);

impl DecoyHash {
    pub async fn get(&self, cost: u32) -> Result<String, PasswordError> {
        self.0
            .get_or_try_init(|| hash_password_blocking(DECOY_PASSWORD.to_string(), cost))
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let first = hash_password("correct horse", TEST_COST).unwrap();
        let second = hash_password("correct horse", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(!first.contains("correct horse"));
        assert!(verify_password("correct horse", &first));
        assert!(verify_password("correct horse", &second));
        assert!(!verify_password("battery staple", &first));
    }

    #[test]
    fn corrupt_hash_never_matches() {
        assert!(!verify_password("anything", "plaintext-not-a-hash"));
    }

    #[tokio::test]
    async fn decoy_hash_is_built_once_at_configured_cost() {
        let decoy = DecoyHash::default();
        let first = decoy.get(TEST_COST).await.unwrap();
        let second = decoy.clone().get(TEST_COST).await.unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("$2b$04$"));
        assert!(!verify_password("hunter2", &first));
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hash = hash_password_blocking("s3cret".to_string(), TEST_COST).await.unwrap();
        assert!(verify_password_blocking("s3cret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password_blocking("nope".to_string(), hash).await.unwrap());
    }
}
