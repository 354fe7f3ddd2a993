//! Application initialization: tracing, database, routes, server.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::Router;
use orderdesk_core::Config;

use crate::state::AppState;

/// Initialize tracing with an env-filter (`RUST_LOG`), defaulting to info.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Connect the database, build the state, and assemble the router.
pub async fn initialize_app(config: Config) -> Result<(Router, Arc<AppState>), anyhow::Error> {
    let pool = database::setup_database(&config).await?;
    let state = Arc::new(AppState::new(pool, config.clone()));
    let router = routes::setup_routes(&config, state.clone())?;
    Ok((router, state))
}
