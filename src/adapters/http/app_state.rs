use std::sync::Arc;

use crate::{
    application::use_cases::{authorization::Authorizer, session::SessionUseCases},
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session_use_cases: Arc<SessionUseCases>,
    pub authorizer: Arc<Authorizer>,
}
