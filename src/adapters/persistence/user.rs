use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::ports::credential_verifier::CredentialVerifier,
    domain::entities::{role::Role, subject::Subject},
};

// Credential columns of a user row.
#[derive(sqlx::FromRow, Debug)]
pub struct UserCredentialDb {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub role: String,
    pub company: Option<i64>,
}

#[async_trait]
impl CredentialVerifier for PostgresPersistence {
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<Option<Subject>> {
        let row = sqlx::query_as::<_, UserCredentialDb>(
            "SELECT id, email, password, role, company FROM users WHERE email = $1",
        )
        .bind(identifier)
        .fetch_optional(self.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Argon2 verification is CPU-bound.
        let secret = secret.to_owned();
        let stored = row.password.clone();
        let matches = tokio::task::spawn_blocking(move || password_matches(&secret, &stored))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !matches {
            return Ok(None);
        }

        let role: Role = row.role.parse().map_err(|e: String| {
            tracing::error!(user_id = row.id, error = %e, "User row has unknown role");
            AppError::Internal(e)
        })?;

        Ok(Some(Subject {
            id: row.id,
            email: row.email,
            role,
            organization_ref: row.company,
        }))
    }
}

/// Check `secret` against an Argon2 PHC string. Unparseable hashes never match.
pub fn password_matches(secret: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a PHC string");
            false
        }
    }
}
