//! Staffroll API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod state;

use staffroll_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let pool = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            Some(api_services::connect_and_migrate(database_url).await?)
        }
        StorageBackend::Memory => None,
    };

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let storage = if pool.is_some() { "postgres" } else { "memory" };
    let app_state = api_services::build_app_state(pool)?;

    if config.seed_reference_data {
        dev_seed::run(app_state.reference_data.as_ref()).await?;
    }

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, storage, "staffroll-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
