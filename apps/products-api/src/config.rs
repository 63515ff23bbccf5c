//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse_or, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            postgres: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            run_migrations: env_parse_or("RUN_MIGRATIONS", true)?,
        })
    }
}
