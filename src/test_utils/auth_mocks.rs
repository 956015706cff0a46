//! In-memory mock implementations of the session ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::{Duration, OffsetDateTime};

use crate::{
    app_error::AppResult,
    application::ports::{
        credential_verifier::CredentialVerifier,
        revocation_store::{RevocationError, RevocationStore, revocation_key},
    },
    domain::entities::subject::Subject,
};

// ============================================================================
// InMemoryCredentialVerifier
// ============================================================================

/// Plain-text credential table for tests.
#[derive(Default)]
pub struct InMemoryCredentialVerifier {
    accounts: HashMap<String, (String, Subject)>,
}

impl InMemoryCredentialVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, identifier: &str, secret: &str, subject: Subject) -> Self {
        self.accounts
            .insert(identifier.to_string(), (secret.to_string(), subject));
        self
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentialVerifier {
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<Option<Subject>> {
        Ok(self
            .accounts
            .get(identifier)
            .filter(|(stored, _)| stored == secret)
            .map(|(_, subject)| subject.clone()))
    }
}

// ============================================================================
// InMemoryRevocationStore
// ============================================================================

/// Revocation store keyed like the Redis one, with expiry checked on read.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: Mutex<HashMap<String, OffsetDateTime>>,
    /// Writes accepted before the store starts failing; `None` is unlimited.
    writes_left: Mutex<Option<usize>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that goes down after `limit` successful writes.
    pub fn with_write_limit(limit: usize) -> Self {
        Self {
            writes_left: Mutex::new(Some(limit)),
            ..Self::default()
        }
    }

    /// Remaining lifetime of the entry for `token`, if it is still held.
    pub fn ttl_of(&self, token: &str) -> Option<Duration> {
        let now = OffsetDateTime::now_utc();
        self.entries
            .lock()
            .unwrap()
            .get(&revocation_key(token))
            .map(|expires_at| *expires_at - now)
            .filter(|ttl| ttl.is_positive())
    }

    pub fn len(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|expires_at| **expires_at > now)
            .count()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), RevocationError> {
        if !ttl.is_positive() {
            return Ok(());
        }
        if let Some(left) = self.writes_left.lock().unwrap().as_mut() {
            if *left == 0 {
                return Err(RevocationError::Unavailable("write limit reached".into()));
            }
            *left -= 1;
        }
        let expires_at = OffsetDateTime::now_utc() + ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(revocation_key(token), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let now = OffsetDateTime::now_utc();
        let mut entries = self.entries.lock().unwrap();
        let key = revocation_key(token);
        match entries.get(&key).copied() {
            Some(expires_at) if expires_at > now => Ok(true),
            Some(_) => {
                entries.remove(&key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// UnavailableRevocationStore
// ============================================================================

/// Store whose backend is always unreachable.
pub struct UnavailableRevocationStore;

#[async_trait]
impl RevocationStore for UnavailableRevocationStore {
    async fn revoke(&self, _token: &str, _ttl: Duration) -> Result<(), RevocationError> {
        Err(RevocationError::Unavailable("connection refused".into()))
    }

    async fn is_revoked(&self, _token: &str) -> Result<bool, RevocationError> {
        Err(RevocationError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_subject;

    #[tokio::test]
    async fn verifier_matches_identifier_and_secret() {
        let verifier = InMemoryCredentialVerifier::new().with_account(
            "a@example.com",
            "pw",
            create_test_subject(|s| s.id = 3),
        );

        let found = verifier.verify("a@example.com", "pw").await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(3));
        assert!(verifier.verify("a@example.com", "PW").await.unwrap().is_none());
        assert!(verifier.verify("b@example.com", "pw").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoke_then_check() {
        let store = InMemoryRevocationStore::new();
        assert!(!store.is_revoked("t").await.unwrap());

        store.revoke("t", Duration::minutes(5)).await.unwrap();
        assert!(store.is_revoked("t").await.unwrap());
        assert!(!store.is_revoked("other").await.unwrap());
    }

    #[tokio::test]
    async fn revoke_twice_keeps_token_revoked() {
        let store = InMemoryRevocationStore::new();
        store.revoke("t", Duration::minutes(5)).await.unwrap();
        store.revoke("t", Duration::minutes(5)).await.unwrap();

        assert!(store.is_revoked("t").await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn non_positive_ttl_is_noop() {
        let store = InMemoryRevocationStore::new();
        store.revoke("t", Duration::ZERO).await.unwrap();
        store.revoke("u", Duration::seconds(-30)).await.unwrap();

        assert!(!store.is_revoked("t").await.unwrap());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn write_limit_fails_later_writes() {
        let store = InMemoryRevocationStore::with_write_limit(1);
        store.revoke("t", Duration::minutes(5)).await.unwrap();

        assert!(matches!(
            store.revoke("u", Duration::minutes(5)).await,
            Err(RevocationError::Unavailable(_))
        ));
        assert!(store.is_revoked("t").await.unwrap());
        assert!(!store.is_revoked("u").await.unwrap());
    }

    #[tokio::test]
    async fn entries_expire_on_their_own() {
        let store = InMemoryRevocationStore::new();
        store.revoke("t", Duration::milliseconds(20)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(40)).await;

        assert!(!store.is_revoked("t").await.unwrap());
    }
}
