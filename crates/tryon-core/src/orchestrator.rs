//! Submit → wait → poll orchestration for one try-on job.

use std::sync::Arc;
use std::time::Duration;
use image::RgbImage;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use crate::client::JobClient;
use crate::codec;
use crate::config::PollConfig;
use crate::error::{Result, TryOnError};
use crate::job::{JobHandle, JobRequest, JobStatus};

/// Terminal outcome of one run. Never retried by the orchestrator.
#[derive(Debug, Clone)]
pub enum OrchestrationResult {
    Success { image: RgbImage, seed: u32 },
    Failure(TryOnError),
}

impl OrchestrationResult {
    /// Human-readable failure reason, `None` on success.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(err) => Some(err.to_string()),
        }
    }
}

pub struct Orchestrator {
    client: Arc<dyn JobClient>,
    poll: PollConfig,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn JobClient>, poll: PollConfig) -> Self {
        Self { client, poll }
    }

    #[instrument(name = "tryon_run", skip_all, fields(run_id = %Uuid::new_v4(), seed = seed))]
    pub async fn run(&self, person: RgbImage, garment: RgbImage, seed: u32) -> OrchestrationResult {
        match self.execute(person, garment, seed).await {
            Ok(image) => {
                info!(width = image.width(), height = image.height(), "Try-on complete");
                OrchestrationResult::Success { image, seed }
            }
            Err(err) => {
                warn!(error = %err, "Try-on failed");
                OrchestrationResult::Failure(err)
            }
        }
    }

    /// Like [`run`](Self::run), but abandons the run once `deadline` elapses.
    ///
    /// Dropping the run future aborts any in-flight request; the remote job
    /// is left to expire on its own.
    pub async fn run_with_deadline(
        &self,
        person: RgbImage,
        garment: RgbImage,
        seed: u32,
        deadline: Duration,
    ) -> OrchestrationResult {
        match timeout(deadline, self.run(person, garment, seed)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(?deadline, "Try-on abandoned at deadline");
                OrchestrationResult::Failure(TryOnError::DeadlineExceeded(deadline))
            }
        }
    }

    async fn execute(&self, person: RgbImage, garment: RgbImage, seed: u32) -> Result<RgbImage> {
        let (person_payload, garment_payload) = codec::offload(
            move || Ok((codec::encode_to_payload(&person)?, codec::encode_to_payload(&garment)?)),
            TryOnError::Encode,
        )
        .await?;
        let request = JobRequest::new(person_payload, garment_payload, seed);

        let submit_started = Instant::now();
        let handle = self.client.submit(&request).await.map_err(|err| match err {
            TryOnError::Submission(_) => err,
            other => TryOnError::Submission(other.to_string()),
        })?;
        info!(job_id = %handle, elapsed = ?submit_started.elapsed(), "Job submitted");

        let poll_started = Instant::now();
        sleep(self.poll.initial_delay).await;
        let payload = self.poll_until_terminal(&handle).await;
        info!(job_id = %handle, elapsed = ?poll_started.elapsed(), "Polling finished");

        let payload = payload?;
        codec::offload(
            move || {
                let mut image = codec::decode_payload(&payload)?;
                codec::swap_channels(&mut image);
                Ok(image)
            },
            TryOnError::Decode,
        )
        .await
    }

    /// Queries `handle` until a terminal status or the attempt budget runs out.
    /// Returns the result payload on success.
    pub async fn poll_until_terminal(&self, handle: &JobHandle) -> Result<String> {
        let max_attempts = self.poll.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.client.query_status(handle).await {
                Ok(status) => {
                    debug!(attempt, max_attempts, status = status.label(), "Status received");
                    match status {
                        JobStatus::Success(payload) => return Ok(payload),
                        JobStatus::Error(message) => return Err(TryOnError::RemoteJob(message)),
                        JobStatus::Pending => {}
                    }
                }
                Err(err) => {
                    warn!(attempt, max_attempts, error = %err, "Status query failed");
                    last_error = Some(err.to_string());
                }
            }

            if attempt < max_attempts {
                sleep(self.poll.poll_interval).await;
            }
        }

        Err(TryOnError::RetryBudgetExhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}
