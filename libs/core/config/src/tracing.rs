use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

const PRODUCTION_FILTER: &str = "info,tower_http=info,sea_orm=warn";
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,sea_orm=info,sqlx=warn";

/// Installs color-eyre: error locations on, environment section off.
/// Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    }
}

/// Initialize tracing for the given environment.
///
/// Production (`APP_ENV=production`) logs flattened JSON without targets;
/// development logs pretty, multi-line events. `RUST_LOG` overrides
/// [`default_filter`]. Both add `tracing_error::ErrorLayer` so eyre reports
/// carry span traces.
///
/// Later calls are no-ops.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let result = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
