//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates an `AppState`
//! wired with in-memory mocks for testing HTTP endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::TokenCodec,
        ports::revocation_store::RevocationStore,
        use_cases::{authorization::Authorizer, session::SessionUseCases},
    },
    domain::entities::subject::Subject,
    infra::config::AppConfig,
    test_utils::{
        InMemoryCredentialVerifier, InMemoryRevocationStore, TEST_ACCESS_SECRET,
        TEST_REFRESH_SECRET, create_test_codec,
    },
};

/// Handles to the mocks behind a built `AppState`.
pub struct TestHandles {
    pub codec: Arc<TokenCodec>,
    pub revocations: Arc<InMemoryRevocationStore>,
}

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, handles) = TestAppStateBuilder::new()
///     .with_account("u@x.com", "pw123", create_test_subject(|s| s.id = 1))
///     .build();
/// ```
pub struct TestAppStateBuilder {
    verifier: InMemoryCredentialVerifier,
    revocations: Option<Arc<dyn RevocationStore>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            verifier: InMemoryCredentialVerifier::new(),
            revocations: None,
        }
    }

    /// Register an account the credential verifier will accept.
    pub fn with_account(mut self, identifier: &str, secret: &str, subject: Subject) -> Self {
        self.verifier = self.verifier.with_account(identifier, secret, subject);
        self
    }

    /// Replace the in-memory revocation store (e.g. with an unavailable one).
    pub fn with_revocation_store(mut self, store: Arc<dyn RevocationStore>) -> Self {
        self.revocations = Some(store);
        self
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> (AppState, TestHandles) {
        let codec = Arc::new(create_test_codec());
        let memory_store = Arc::new(InMemoryRevocationStore::new());
        let revocations: Arc<dyn RevocationStore> = self
            .revocations
            .unwrap_or_else(|| memory_store.clone());

        let session_use_cases = SessionUseCases::new(
            Arc::new(self.verifier),
            revocations.clone(),
            codec.clone(),
        );
        let authorizer = Authorizer::new(codec.clone(), revocations);

        // Create minimal config for testing
        let config = Arc::new(AppConfig {
            access_token_secret: SecretString::new(TEST_ACCESS_SECRET.into()),
            refresh_token_secret: SecretString::new(TEST_REFRESH_SECRET.into()),
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(7),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
            redis_url: String::new(),
            revocation_timeout: std::time::Duration::from_millis(500),
            database_url: String::new(),
            log_file: None,
        });

        let app_state = AppState {
            config,
            session_use_cases: Arc::new(session_use_cases),
            authorizer: Arc::new(authorizer),
        };

        (
            app_state,
            TestHandles {
                codec,
                revocations: memory_store,
            },
        )
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
