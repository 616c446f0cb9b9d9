pub mod config;
mod routes;
mod schemas;
mod state;

use std::sync::Arc;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use crate::backend::config::AppConfig;
use crate::backend::routes::api_routes;
use crate::backend::state::TryOnState;

pub fn app(state: Arc<TryOnState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn serve(conf: AppConfig) -> anyhow::Result<()> {
    let state = TryOnState::from_config(&conf)?;
    let app = app(Arc::new(state), conf.max_upload_bytes);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], conf.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Starting try-on server on port {}", conf.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
