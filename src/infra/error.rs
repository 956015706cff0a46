use thiserror::Error;

use crate::application::jwt::KeyConfigError;

/// Infrastructure errors that can occur during application startup.
///
/// SECURITY: Display messages are sanitized and safe for logs/console output.
/// Debug output includes the full #[source] error chain which may contain
/// secrets (e.g., connection strings) - use Display (%e) not Debug (?e) in logs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Database connection failed. Check DATABASE_URL and ensure the database is running.")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("Redis connection failed. Check REDIS_URL and credentials.")]
    RedisConnection(#[source] redis::RedisError),

    #[error("Token keys are misconfigured. Check the *_TOKEN_SECRET and *_TOKEN_TTL_* variables.")]
    TokenKeys(#[source] KeyConfigError),
}

impl From<sqlx::Error> for InfraError {
    fn from(e: sqlx::Error) -> Self {
        InfraError::DatabaseConnection(e)
    }
}

impl From<KeyConfigError> for InfraError {
    fn from(e: KeyConfigError) -> Self {
        InfraError::TokenKeys(e)
    }
}
