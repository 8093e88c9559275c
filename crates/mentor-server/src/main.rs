mod config;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        "SERVER: Models in priority order: {}",
        config.provider.model_priority.join(", ")
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let app = routes::build_router(state);

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
