//! Products API - REST server for the product catalog

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;
    info!("Successfully connected to PostgreSQL");

    if config.run_migrations {
        postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db.clone();
    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing PostgreSQL connections");
        close_postgres(db, "products").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
