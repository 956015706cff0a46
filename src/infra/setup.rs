use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::TokenCodec,
        ports::{credential_verifier::CredentialVerifier, revocation_store::RevocationStore},
        use_cases::{authorization::Authorizer, session::SessionUseCases},
    },
    infra::{
        InfraError, config::AppConfig, postgres_persistence, revocation::RedisRevocationStore,
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let codec = Arc::new(TokenCodec::new(
        &config.access_token_secret,
        &config.refresh_token_secret,
        config.access_token_ttl,
        config.refresh_token_ttl,
    )
    .map_err(InfraError::from)?);

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);
    let revocations = Arc::new(
        RedisRevocationStore::new(&config.redis_url, config.revocation_timeout).await?,
    ) as Arc<dyn RevocationStore>;

    let session_use_cases = SessionUseCases::new(
        postgres_arc as Arc<dyn CredentialVerifier>,
        revocations.clone(),
        codec.clone(),
    );
    let authorizer = Authorizer::new(codec, revocations);

    Ok(AppState {
        config: Arc::new(config),
        session_use_cases: Arc::new(session_use_cases),
        authorizer: Arc::new(authorizer),
    })
}

pub fn init_tracing(log_file: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jobboard_auth=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), only when LOG_FILE is set
    let (log_file, log_file_error) = match open_log_file(log_file) {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };
    let json_layer = log_file.map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some(e) = log_file_error {
        tracing::warn!(error = %e, "LOG_FILE could not be opened, JSON logs disabled");
    }
}

fn open_log_file(path: Option<&str>) -> std::io::Result<Option<File>> {
    path.map(File::create).transpose()
}
