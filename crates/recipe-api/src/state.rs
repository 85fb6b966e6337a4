use std::sync::Arc;

use recipe_core::repositories::Repositories;
use recipe_core::services::Services;
use recipe_security::JwtService;
use recipe_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
        let services = Services::new(repos, jwt, &config.auth.admin_emails);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
