use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::{Claims, TokenClass, TokenCodec},
        ports::revocation_store::RevocationStore,
    },
    domain::entities::role::Role,
};

/// Caller identity resolved from a verified access token. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedContext {
    #[serde(rename = "id")]
    pub subject_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(rename = "company")]
    pub organization_ref: Option<i64>,
}

impl From<Claims> for AuthenticatedContext {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.subject_id,
            email: claims.email,
            role: claims.role,
            organization_ref: claims.organization_ref,
        }
    }
}

/// Token part of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Access-token gate shared by every protected route.
#[derive(Clone)]
pub struct Authorizer {
    codec: Arc<TokenCodec>,
    revocations: Arc<dyn RevocationStore>,
}

impl Authorizer {
    pub fn new(codec: Arc<TokenCodec>, revocations: Arc<dyn RevocationStore>) -> Self {
        Self { codec, revocations }
    }

    /// Resolve the caller behind `authorization`, requiring one of
    /// `required_roles` unless the slice is empty.
    ///
    /// A store failure rejects the request.
    #[instrument(skip(self, authorization))]
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required_roles: &[Role],
    ) -> AppResult<AuthenticatedContext> {
        let token = bearer_token(authorization).ok_or(AppError::MissingCredentials)?;

        if self.revocations.is_revoked(token).await? {
            return Err(AppError::RevokedToken);
        }

        let claims = self.codec.decode(TokenClass::Access, token)?;

        if !required_roles.is_empty() && !required_roles.contains(&claims.role) {
            tracing::debug!(subject_id = claims.subject_id, role = %claims.role, "Role not permitted");
            return Err(AppError::Forbidden);
        }

        Ok(claims.into())
    }
}
