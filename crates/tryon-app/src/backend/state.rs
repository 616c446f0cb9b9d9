use std::sync::Arc;
use std::time::Duration;
use tryon_core::{JobClient, Orchestrator, PollConfig, RemoteJobClient};
use crate::backend::config::AppConfig;

/// Read-only state shared by every request.
pub struct TryOnState {
    pub orchestrator: Orchestrator,
    pub request_timeout: Duration,
}

impl TryOnState {
    pub fn new(client: Arc<dyn JobClient>, poll: PollConfig, request_timeout: Duration) -> Self {
        Self {
            orchestrator: Orchestrator::new(client, poll),
            request_timeout,
        }
    }

    pub fn from_config(conf: &AppConfig) -> anyhow::Result<Self> {
        let client = RemoteJobClient::new(conf.remote.clone(), &conf.poll)?;
        Ok(Self::new(Arc::new(client), conf.poll, conf.request_timeout))
    }
}
