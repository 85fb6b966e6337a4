//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_PORT, DEVELOPMENT_ENV,
    DEV_JWT_SECRET,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Directory served for every request no API route matches.
    pub static_dir: String,
    pub body_limit_bytes: usize,
    pub log_format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Seconds.
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsSettings {
    /// Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthSettings {
    /// Accounts registered with one of these emails get the admin role.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl AppConfig {
    /// Layers defaults, `config/default`, `config/{APP_ENV}`, `__`-separated
    /// environment variables and finally the bare `PORT`, `JWT_SECRET` and
    /// `DATABASE_URL` variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| DEVELOPMENT_ENV.into());
        let mut builder = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", i64::from(DEFAULT_PORT))?
            .set_default("app.name", "recipe-book-api")?
            .set_default("app.static_dir", "public")?
            .set_default("app.body_limit_bytes", DEFAULT_BODY_LIMIT_BYTES as i64)?
            .set_default("app.log_format", "json")?
            .set_default("database.backend", "postgres")?
            .set_default("database.url", "postgres://localhost:5432/recipe_book")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.run_migrations", true)?
            .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("auth.admin_emails", Vec::<String>::new())?;

        if env == DEVELOPMENT_ENV {
            builder = builder.set_default("jwt.secret", DEV_JWT_SECRET)?;
        }

        let config = builder
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("auth.admin_emails")
                    .try_parsing(true),
            )
            .set_override_option("app.port", std::env::var("PORT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.app.env == DEVELOPMENT_ENV
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret must not be empty".into()));
        }
        if !self.is_development() && self.jwt.secret == DEV_JWT_SECRET {
            return Err(AppError::InvalidConfig(format!(
                "jwt.secret must be set explicitly outside {DEVELOPMENT_ENV}"
            )));
        }
        if self.jwt.access_token_expiry <= 0 {
            return Err(AppError::InvalidConfig(
                "jwt.access_token_expiry must be positive".into(),
            ));
        }
        if self.database.backend == StorageBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::InvalidConfig(
                "database.url is required for the postgres backend".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    /// Development settings backed by the in-memory store.
    fn default() -> Self {
        Self {
            app: AppSettings {
                env: DEVELOPMENT_ENV.to_string(),
                host: "127.0.0.1".to_string(),
                port: DEFAULT_PORT,
                name: "recipe-book-api".to_string(),
                static_dir: "public".to_string(),
                body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
                log_format: LogFormat::Pretty,
            },
            database: DatabaseSettings {
                backend: StorageBackend::Memory,
                url: String::new(),
                max_connections: 10,
                min_connections: 1,
                run_migrations: false,
            },
            jwt: JwtSettings {
                secret: DEV_JWT_SECRET.to_string(),
                access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            },
            cors: CorsSettings::default(),
            auth: AuthSettings::default(),
        }
    }
}
