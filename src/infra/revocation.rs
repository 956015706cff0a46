use std::future::Future;

use async_trait::async_trait;
use redis::{AsyncCommands, RedisError, aio::ConnectionManager};
use time::Duration;

use super::InfraError;
use crate::application::ports::revocation_store::{
    RevocationError, RevocationStore, revocation_key,
};

/// Redis-backed revocation store. One command per call, so each key is
/// updated atomically and keys never contend with each other.
#[derive(Clone)]
pub struct RedisRevocationStore {
    manager: ConnectionManager,
    timeout: std::time::Duration,
}

impl RedisRevocationStore {
    pub async fn new(redis_url: &str, timeout: std::time::Duration) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;
        Ok(Self { manager, timeout })
    }
}

/// Run one store round-trip under `limit`.
async fn bounded<T>(
    limit: std::time::Duration,
    op: impl Future<Output = Result<T, RedisError>>,
) -> Result<T, RevocationError> {
    match tokio::time::timeout(limit, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(RevocationError::Unavailable(e.to_string())),
        Err(_) => Err(RevocationError::Timeout),
    }
}

/// Whole seconds for `SET EX`, rounded up so the entry never expires before
/// the token does. `None` when there is nothing left to revoke.
fn ttl_secs(ttl: Duration) -> Option<u64> {
    if !ttl.is_positive() {
        return None;
    }
    let secs = ttl.whole_seconds() as u64 + u64::from(ttl.subsec_nanoseconds() > 0);
    Some(secs)
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), RevocationError> {
        let Some(secs) = ttl_secs(ttl) else {
            return Ok(());
        };

        let mut conn = self.manager.clone();
        let key = revocation_key(token);
        bounded(self.timeout, conn.set_ex::<_, _, ()>(key, "revoked", secs)).await
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let mut conn = self.manager.clone();
        let key = revocation_key(token);
        bounded(self.timeout, conn.exists::<_, bool>(key)).await
    }
}
