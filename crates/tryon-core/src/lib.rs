pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod report;

pub use client::{JobClient, RemoteJobClient};
pub use config::{PollConfig, RemoteConfig};
pub use error::{Result, TryOnError};
pub use job::{JobHandle, JobRequest, JobStatus, MAX_SEED};
pub use orchestrator::{OrchestrationResult, Orchestrator};
pub use report::{report, CallerResponse, ErrorBody, TryOnResponse};
