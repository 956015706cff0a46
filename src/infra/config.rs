use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

pub struct AppConfig {
    pub access_token_secret: SecretString,
    pub refresh_token_secret: SecretString,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub redis_url: String,
    /// Upper bound on a single revocation store round-trip.
    pub revocation_timeout: std::time::Duration,
    pub database_url: String,
    /// Optional path for structured JSON logs alongside the console output.
    pub log_file: Option<String>,
}

impl AppConfig {
    /// Panics when a required variable is missing: the service must not start
    /// without both signing secrets.
    pub fn from_env() -> Self {
        let access_token_secret =
            SecretString::new(get_env::<String>("ACCESS_TOKEN_SECRET").into());
        let refresh_token_secret =
            SecretString::new(get_env::<String>("REFRESH_TOKEN_SECRET").into());

        let access_token_ttl_secs: i64 = get_env_default("ACCESS_TOKEN_TTL_SECS", 3_600);
        let refresh_token_ttl_days: i64 = get_env_default("REFRESH_TOKEN_TTL_DAYS", 7);

        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let revocation_timeout_ms: u64 = get_env_default("REVOCATION_TIMEOUT_MS", 500);
        let database_url: String = get_env("DATABASE_URL");
        let log_file: Option<String> = std::env::var("LOG_FILE").ok().filter(|p| !p.is_empty());

        Self {
            access_token_secret,
            refresh_token_secret,
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            refresh_token_ttl: Duration::days(refresh_token_ttl_days),
            cors_origin,
            bind_addr,
            redis_url,
            revocation_timeout: std::time::Duration::from_millis(revocation_timeout_ms),
            database_url,
            log_file,
        }
    }
}
