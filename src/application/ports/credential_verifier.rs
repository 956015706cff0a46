use async_trait::async_trait;

use crate::{app_error::AppResult, domain::entities::subject::Subject};

/// Confirms an identifier/secret pair against the account backing store.
///
/// Returns `Ok(None)` for both an unknown identifier and a wrong secret.
/// `Err` is reserved for the store itself failing.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<Option<Subject>>;
}
