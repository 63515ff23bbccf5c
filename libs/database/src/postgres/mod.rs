//! PostgreSQL connector, migrations runner and health checks (SeaORM)

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect_from_config_with_retry, run_migrations};
pub use health::{check_health, check_health_with_query};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
