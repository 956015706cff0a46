use async_trait::async_trait;
use thiserror::Error;
use time::Duration;

/// Failures of the shared revocation store. Callers treat every variant as
/// "cannot prove the token is live" and reject.
#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("revocation store unreachable: {0}")]
    Unavailable(String),

    #[error("revocation store timed out")]
    Timeout,
}

/// Shared, time-bounded set of revoked tokens.
///
/// Each operation touches exactly one key and must be atomic for that key.
/// Entries expire on their own; there is no delete.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Mark `token` revoked for `ttl`. A non-positive `ttl` is a no-op.
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), RevocationError>;

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError>;
}

/// Store key for a token. Tokens are hashed so keys stay short and raw bearer
/// strings never sit in the store.
pub fn revocation_key(token: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("revoked:{}", hex::encode(hasher.finalize()))
}
