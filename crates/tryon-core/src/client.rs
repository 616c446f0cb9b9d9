mod schemas;

use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE, REFERER};
use tracing::{debug, warn};
use crate::config::{PollConfig, RemoteConfig};
use crate::error::{Result, TryOnError};
use crate::job::{JobHandle, JobRequest, JobStatus};

use schemas::{RemoteEnvelope, RemoteResult};

const REMOTE_ERROR_FALLBACK: &str = "Error status returned";

/// Submit and status-query operations against a try-on job service.
///
/// Implementations must be cheap to share; one client serves every
/// concurrent run.
#[async_trait]
pub trait JobClient: Send + Sync {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle>;

    /// Timeouts and non-terminal statuses come back as [`JobStatus::Pending`];
    /// only malformed or unexpected responses are errors.
    async fn query_status(&self, handle: &JobHandle) -> Result<JobStatus>;
}

/// HTTP client for the remote service.
pub struct RemoteJobClient {
    client: reqwest::Client,
    remote: RemoteConfig,
    submit_timeout: Duration,
    query_timeout: Duration,
}

impl RemoteJobClient {
    pub fn new(remote: RemoteConfig, poll: &PollConfig) -> Result<Self> {
        remote.validate()?;
        poll.validate()?;

        let client = reqwest::Client::builder()
            .default_headers(auth_headers(&remote)?)
            .build()
            .map_err(|e| TryOnError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            remote,
            submit_timeout: poll.submit_timeout,
            query_timeout: poll.query_timeout,
        })
    }
}

fn auth_headers(remote: &RemoteConfig) -> Result<HeaderMap> {
    let value = |name: &str, raw: &str| {
        HeaderValue::from_str(raw)
            .map_err(|_| TryOnError::Config(format!("{name} contains characters not allowed in a header")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut token = value("token", &remote.token)?;
    token.set_sensitive(true);
    headers.insert(HeaderName::from_static("token"), token);

    let mut cookie = value("cookie", &remote.cookie)?;
    cookie.set_sensitive(true);
    headers.insert(COOKIE, cookie);

    headers.insert(REFERER, value("referer", &remote.referer)?);
    Ok(headers)
}

#[async_trait]
impl JobClient for RemoteJobClient {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle> {
        let response = self
            .client
            .post(self.remote.submit_url())
            .json(request)
            .timeout(self.submit_timeout)
            .send()
            .await
            .map_err(|e| TryOnError::Submission(format!("failed to call external API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TryOnError::Submission(format!("HTTP {status}: {body}")));
        }

        let envelope: RemoteEnvelope = response
            .json()
            .await
            .map_err(|e| TryOnError::Submission(format!("unreadable response: {e}")))?;

        if !envelope.result.is_success() {
            return Err(TryOnError::Submission(format!(
                "error in external API (status {:?})",
                envelope.result.status
            )));
        }

        let id = envelope
            .result
            .value()
            .ok_or_else(|| TryOnError::Submission("response carried no job id".into()))?;

        debug!(job_id = id, "Job accepted");
        Ok(JobHandle::new(id))
    }

    async fn query_status(&self, handle: &JobHandle) -> Result<JobStatus> {
        let response = match self
            .client
            .get(self.remote.query_url(handle.as_str()))
            .timeout(self.query_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!(job_id = %handle, "Status query timed out");
                return Ok(JobStatus::Pending);
            }
            Err(e) => return Err(TryOnError::Transport(format!("request failed: {e}"))),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TryOnError::Transport(format!("HTTP {status} from status endpoint")));
        }

        let envelope = match response.json::<RemoteEnvelope>().await {
            Ok(envelope) => envelope,
            Err(e) if e.is_timeout() => {
                warn!(job_id = %handle, "Status body timed out");
                return Ok(JobStatus::Pending);
            }
            Err(e) => return Err(TryOnError::Transport(format!("unreadable response: {e}"))),
        };

        classify(envelope.result)
    }
}

fn classify(result: RemoteResult) -> Result<JobStatus> {
    if result.is_success() {
        return result
            .value()
            .map(|payload| JobStatus::Success(payload.to_string()))
            .ok_or_else(|| TryOnError::Transport("success status without result image".into()));
    }

    if result.is_error() {
        let message = result
            .message
            .as_deref()
            .or(result.result.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(REMOTE_ERROR_FALLBACK);
        return Ok(JobStatus::Error(message.to_string()));
    }

    Ok(JobStatus::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: &str, value: Option<&str>) -> RemoteResult {
        RemoteResult {
            status: status.into(),
            result: value.map(str::to_string),
            message: None,
        }
    }

    #[test]
    fn test_classify_success() {
        let status = classify(result("success", Some("aGVsbG8="))).unwrap();
        assert_eq!(status, JobStatus::Success("aGVsbG8=".into()));
    }

    #[test]
    fn test_classify_success_without_payload_is_transport_error() {
        assert!(matches!(
            classify(result("success", None)),
            Err(TryOnError::Transport(_))
        ));
        assert!(matches!(
            classify(result("success", Some("  "))),
            Err(TryOnError::Transport(_))
        ));
    }

    #[test]
    fn test_classify_error_prefers_remote_message() {
        let with_message = RemoteResult {
            status: "error".into(),
            result: None,
            message: Some("person not found".into()),
        };
        assert_eq!(classify(with_message).unwrap(), JobStatus::Error("person not found".into()));

        assert_eq!(
            classify(result("error", None)).unwrap(),
            JobStatus::Error(REMOTE_ERROR_FALLBACK.into())
        );
    }

    #[test]
    fn test_classify_other_statuses_are_pending() {
        for status in ["running", "queued", "waiting", ""] {
            assert_eq!(classify(result(status, None)).unwrap(), JobStatus::Pending);
        }
    }

    #[test]
    fn test_status_match_is_exact() {
        assert_eq!(classify(result("SUCCESS", Some("aGVsbG8="))).unwrap(), JobStatus::Pending);
        assert_eq!(classify(result("Error", Some("boom"))).unwrap(), JobStatus::Pending);
    }

    #[test]
    fn test_rejects_invalid_header_values() {
        let remote = RemoteConfig::new("http://tryon.local/", "tok\nen", "c", "r");
        assert!(matches!(
            RemoteJobClient::new(remote, &PollConfig::default()),
            Err(TryOnError::Config(_))
        ));
    }
}
