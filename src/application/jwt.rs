use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::domain::entities::{role::Role, subject::Subject};

const ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Claims
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Access,
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "sub")]
    pub subject_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(rename = "company", default, skip_serializing_if = "Option::is_none")]
    pub organization_ref: Option<i64>,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Random per-token id so two tokens minted in the same second differ.
    #[serde(rename = "jti")]
    pub token_id: String,
}

impl Claims {
    pub fn subject(&self) -> Subject {
        Subject {
            id: self.subject_id,
            email: self.email.clone(),
            role: self.role,
            organization_ref: self.organization_ref,
        }
    }

    /// Time left before expiry; zero or negative once expired.
    pub fn remaining_ttl(&self, now: OffsetDateTime) -> Duration {
        Duration::seconds(self.expires_at - now.unix_timestamp())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Rejected signing key configuration. Raised once at startup.
#[derive(Debug, Error)]
pub enum KeyConfigError {
    #[error("{0} token secret is empty")]
    EmptySecret(TokenClass),

    #[error("access and refresh tokens must use different secrets")]
    SharedSecret,

    #[error("token lifetimes must satisfy 0 < access ({access}s) < refresh ({refresh}s)")]
    InvalidTtl { access: i64, refresh: i64 },
}

// ============================================================================
// Codec
// ============================================================================

struct ClassKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl ClassKeys {
    fn new(class: TokenClass, secret: &SecretString, ttl: Duration) -> Result<Self, KeyConfigError> {
        let raw = secret.expose_secret().as_bytes();
        if raw.is_empty() {
            return Err(KeyConfigError::EmptySecret(class));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(raw),
            decoding: DecodingKey::from_secret(raw),
            ttl,
        })
    }
}

/// Signs and verifies access and refresh tokens, each class with its own secret.
pub struct TokenCodec {
    access: ClassKeys,
    refresh: ClassKeys,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(
        access_secret: &SecretString,
        refresh_secret: &SecretString,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, KeyConfigError> {
        if access_secret.expose_secret() == refresh_secret.expose_secret() {
            return Err(KeyConfigError::SharedSecret);
        }
        // `exp` has whole-second resolution.
        let (access, refresh) = (access_ttl.whole_seconds(), refresh_ttl.whole_seconds());
        if access <= 0 || access >= refresh {
            return Err(KeyConfigError::InvalidTtl { access, refresh });
        }

        // Expiry is checked by hand after the signature so the boundary is inclusive.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            access: ClassKeys::new(TokenClass::Access, access_secret, access_ttl)?,
            refresh: ClassKeys::new(TokenClass::Refresh, refresh_secret, refresh_ttl)?,
            validation,
        })
    }

    fn keys(&self, class: TokenClass) -> &ClassKeys {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    pub fn ttl(&self, class: TokenClass) -> Duration {
        self.keys(class).ttl
    }

    pub fn encode(&self, class: TokenClass, subject: &Subject) -> Result<String, TokenError> {
        self.encode_at(class, subject, OffsetDateTime::now_utc())
    }

    pub fn encode_at(
        &self,
        class: TokenClass,
        subject: &Subject,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let keys = self.keys(class);
        let issued_at = now.unix_timestamp();
        let claims = Claims {
            subject_id: subject.id,
            email: subject.email.clone(),
            role: subject.role,
            organization_ref: subject.organization_ref,
            issued_at,
            expires_at: issued_at + keys.ttl.whole_seconds(),
            token_id: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(ALGORITHM), &claims, &keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn decode(&self, class: TokenClass, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(class, token, OffsetDateTime::now_utc())
    }

    /// Verify `token` under `class`'s secret only. A token whose expiry equals
    /// `now` is already expired.
    pub fn decode_at(
        &self,
        class: TokenClass,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys(class).decoding, &self.validation)?;
        if data.claims.expires_at <= now.unix_timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}
