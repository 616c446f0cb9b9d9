use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use crate::backend::routes::tryon::{health, tryon};
use crate::backend::state::TryOnState;

mod tryon;

pub fn api_routes() -> Router<Arc<TryOnState>> {
    Router::new()
        .route("/tryon", post(tryon))
        .route("/health", get(health))
}
