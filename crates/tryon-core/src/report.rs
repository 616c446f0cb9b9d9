use serde::{Deserialize, Serialize};
use crate::codec;
use crate::error::TryOnError;
use crate::orchestrator::OrchestrationResult;

pub const SUCCESS_INFO: &str = "Success";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TryOnResponse {
    /// Base64 JPEG of the composed image.
    pub image: String,
    pub seed: u32,
    pub info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
}

/// What the caller gets back: exactly one of these two shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CallerResponse {
    Success(TryOnResponse),
    Failure { status: u16, body: ErrorBody },
}

impl CallerResponse {
    pub fn failure(status: u16, reason: impl std::fmt::Display) -> Self {
        Self::Failure {
            status,
            body: ErrorBody {
                detail: format!("Error: {reason}"),
            },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Failure { status, .. } => *status,
        }
    }
}

pub fn failure_status(err: &TryOnError) -> u16 {
    if err.is_upstream() {
        502
    } else if err.is_timeout() {
        504
    } else {
        500
    }
}

pub async fn report(result: OrchestrationResult) -> CallerResponse {
    match result {
        OrchestrationResult::Success { image, seed } => match codec::encode_to_payload_async(image).await {
            Ok(image) => CallerResponse::Success(TryOnResponse {
                image,
                seed,
                info: SUCCESS_INFO.to_string(),
            }),
            Err(err) => CallerResponse::failure(500, err),
        },
        OrchestrationResult::Failure(err) => CallerResponse::failure(failure_status(&err), err),
    }
}
