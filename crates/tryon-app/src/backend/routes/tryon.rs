use std::sync::Arc;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;
use tryon_core::{codec, job, report};
use crate::backend::schemas::{ApiResponse, HealthResponse, TryOnForm};
use crate::backend::state::TryOnState;
use crate::error::AppError;

pub async fn tryon(
    State(state): State<Arc<TryOnState>>,
    multipart: Multipart,
) -> Result<ApiResponse, AppError> {
    let form = TryOnForm::from_multipart(multipart).await?;

    let (person, garment) = tokio::join!(
        codec::decode_async(form.person_img),
        codec::decode_async(form.garment_img),
    );
    let person = person.map_err(|e| AppError::BadRequest(format!("person_img: {e}")))?;
    let garment = garment.map_err(|e| AppError::BadRequest(format!("garment_img: {e}")))?;

    let seed = job::choose_seed(form.seed, form.randomize_seed);
    info!(
        seed,
        person = ?person.dimensions(),
        garment = ?garment.dimensions(),
        "Try-on requested"
    );

    let result = state
        .orchestrator
        .run_with_deadline(person, garment, seed, state.request_timeout)
        .await;

    Ok(ApiResponse(report(result).await))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}
