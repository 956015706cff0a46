use sqlx::PgPool;

use crate::app_error::AppError;

pub mod user;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Log the actual error for debugging, but don't expose details
        tracing::error!(error = ?err, "Database error");
        AppError::Database("Database operation failed".into())
    }
}
