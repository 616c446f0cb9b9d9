use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tryon_core::CallerResponse;
use crate::error::AppError;

/// Fields of a `POST /tryon` multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct TryOnForm {
    pub person_img: Bytes,
    pub garment_img: Bytes,
    pub seed: Option<u32>,
    pub randomize_seed: bool,
}

impl TryOnForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut person_img = None;
        let mut garment_img = None;
        let mut seed = None;
        let mut randomize_seed = false;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "person_img" => person_img = Some(field.bytes().await?),
                "garment_img" => garment_img = Some(field.bytes().await?),
                "seed" => seed = parse_seed(&field.text().await?)?,
                "randomize_seed" => randomize_seed = parse_flag(&field.text().await?)?,
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(Self {
            person_img: person_img.ok_or_else(|| AppError::BadRequest("person_img is required".into()))?,
            garment_img: garment_img.ok_or_else(|| AppError::BadRequest("garment_img is required".into()))?,
            seed,
            randomize_seed,
        })
    }
}

fn parse_seed(raw: &str) -> Result<Option<u32>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("seed must be a non-negative integer, got {raw:?}")))
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::BadRequest(format!("randomize_seed must be a boolean, got {other:?}"))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// HTTP rendering of a [`CallerResponse`].
pub struct ApiResponse(pub CallerResponse);

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.0 {
            CallerResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            CallerResponse::Failure { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(body)).into_response()
            }
        }
    }
}
