//! Drawprompt server
//!
//! Turns a free-text drawing instruction into a validated JSON array of
//! shapes for a fixed-size canvas, using a hosted chat model. Also serves the
//! built frontend.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use inference::{BackendError, BackendRegistry, InferenceGateway, SharedGateway};

pub use api::{build_router, AppState};
pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use pipeline::{DrawRequest, GenerationFailure, PipelineError, ShapePipeline};

/// Startup and serving errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the configured backend and wrap it in the shared gateway
pub fn build_gateway(config: &AppConfig) -> Result<SharedGateway, BackendError> {
    let backend = BackendRegistry::new().create(&config.provider, &config.backend)?;
    log::info!(
        "Using {} backend at {} with model {}",
        backend.name(),
        backend.base_url(),
        config.model.model
    );
    let gateway =
        InferenceGateway::new(backend, config.model.clone()).with_retry(config.retry.clone());
    Ok(Arc::new(gateway))
}

/// Build the router for a loaded configuration
pub fn build_app(config: &AppConfig, gateway: SharedGateway) -> axum::Router {
    let static_dir = &config.server.static_dir;
    let static_dir = if static_dir.is_dir() {
        log::info!("Serving frontend from {:?}", static_dir);
        Some(static_dir.as_path())
    } else {
        log::warn!("Frontend directory {:?} not found, serving the API only", static_dir);
        None
    };

    let pipeline = ShapePipeline::new(gateway, config.geometry);
    build_router(AppState::new(pipeline), static_dir)
}

/// Run the server until Ctrl+C
pub async fn serve(config: AppConfig) -> Result<(), ServerError> {
    let gateway = build_gateway(&config)?;
    if !gateway.health_check().await {
        log::warn!(
            "{} backend did not answer its health check; requests may fail",
            gateway.backend_name()
        );
    }

    let app = build_app(&config, gateway);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()?).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
