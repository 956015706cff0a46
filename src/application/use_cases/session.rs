use std::sync::Arc;

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::{Claims, TokenClass, TokenCodec, TokenError},
        ports::{credential_verifier::CredentialVerifier, revocation_store::RevocationStore},
    },
};

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login, refresh and logout.
///
/// Refresh trusts claims this service signed itself and does not look the
/// subject up again.
#[derive(Clone)]
pub struct SessionUseCases {
    verifier: Arc<dyn CredentialVerifier>,
    revocations: Arc<dyn RevocationStore>,
    codec: Arc<TokenCodec>,
}

impl SessionUseCases {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        revocations: Arc<dyn RevocationStore>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            verifier,
            revocations,
            codec,
        }
    }

    #[instrument(skip(self, secret))]
    pub async fn login(&self, identifier: &str, secret: &str) -> AppResult<TokenPair> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            return Err(AppError::InvalidInput(
                "Email and password are required".into(),
            ));
        }

        // Unknown account and wrong password collapse into the same error.
        let Some(subject) = self.verifier.verify(identifier, secret).await? else {
            tracing::info!("Login rejected");
            return Err(AppError::InvalidCredentials);
        };

        let access_token = self.codec.encode(TokenClass::Access, &subject)?;
        let refresh_token = self.codec.encode(TokenClass::Refresh, &subject)?;

        tracing::info!(subject_id = subject.id, role = %subject.role, "Login succeeded");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a live refresh token. Role and subject are
    /// copied from the refresh claims unchanged.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        if self.revocations.is_revoked(refresh_token).await? {
            return Err(AppError::RevokedToken);
        }

        let claims = self.codec.decode(TokenClass::Refresh, refresh_token)?;
        let access_token = self.codec.encode(TokenClass::Access, &claims.subject())?;

        tracing::debug!(subject_id = claims.subject_id, "Access token refreshed");
        Ok(access_token)
    }

    /// Revoke both tokens for the rest of their lifetimes.
    ///
    /// Already-expired tokens are skipped. A token that fails verification
    /// for any other reason aborts the logout before anything is written.
    #[instrument(skip_all)]
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> AppResult<()> {
        let now = OffsetDateTime::now_utc();
        let access_ttl = live_ttl(
            self.codec.decode_at(TokenClass::Access, access_token, now),
            now,
        )?;
        let refresh_ttl = live_ttl(
            self.codec.decode_at(TokenClass::Refresh, refresh_token, now),
            now,
        )?;

        // Refresh token first, so a failed second write leaves only the short-lived token live.
        for (token, ttl) in [(refresh_token, refresh_ttl), (access_token, access_ttl)] {
            if let Some(ttl) = ttl {
                self.revocations.revoke(token, ttl).await?;
            }
        }

        tracing::info!(
            access_revoked = access_ttl.is_some(),
            refresh_revoked = refresh_ttl.is_some(),
            "Logged out"
        );
        Ok(())
    }
}

fn live_ttl(
    decoded: Result<Claims, TokenError>,
    now: OffsetDateTime,
) -> AppResult<Option<Duration>> {
    match decoded {
        Ok(claims) => Ok(Some(claims.remaining_ttl(now))),
        Err(TokenError::Expired) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
