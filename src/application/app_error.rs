use thiserror::Error;

use crate::application::{jwt::TokenError, ports::revocation_store::RevocationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has been revoked")]
    RevokedToken,

    #[error("Permission denied")]
    Forbidden,

    /// Revocation store could not answer; callers reject (fail-closed).
    #[error("Revocation store unavailable: {0}")]
    StoreUnavailable(#[source] RevocationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    DatabaseError,
    MissingCredentials,
    InvalidCredentials,
    MalformedToken,
    ExpiredToken,
    InvalidSignature,
    RevokedToken,
    Forbidden,
    StoreUnavailable,
    InvalidInput,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::MissingCredentials => "MISSING_CREDENTIALS",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::MalformedToken => "MALFORMED_TOKEN",
            ErrorCode::ExpiredToken => "EXPIRED_TOKEN",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::RevokedToken => "REVOKED_TOKEN",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::MissingCredentials => ErrorCode::MissingCredentials,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::MalformedToken => ErrorCode::MalformedToken,
            AppError::ExpiredToken => ErrorCode::ExpiredToken,
            AppError::InvalidSignature => ErrorCode::InvalidSignature,
            AppError::RevokedToken => ErrorCode::RevokedToken,
            AppError::Forbidden => ErrorCode::Forbidden,
            AppError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::ExpiredToken,
            TokenError::InvalidSignature => AppError::InvalidSignature,
            TokenError::Malformed(_) => AppError::MalformedToken,
            TokenError::Signing(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RevocationError> for AppError {
    fn from(err: RevocationError) -> Self {
        AppError::StoreUnavailable(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
