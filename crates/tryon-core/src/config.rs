use std::fmt;
use std::time::Duration;
use crate::error::{Result, TryOnError};

/// Upper bound the remote contract allows for a submit call.
pub const MAX_SUBMIT_TIMEOUT: Duration = Duration::from_secs(50);
/// Upper bound the remote contract allows for a status query.
pub const MAX_QUERY_TIMEOUT: Duration = Duration::from_secs(20);

/// Endpoint and credentials of the remote try-on service.
///
/// `base_endpoint` is a prefix: the client appends `Submit` and `Query`
/// directly, so it normally ends with a `/`.
#[derive(Clone)]
pub struct RemoteConfig {
    pub base_endpoint: String,
    pub token: String,
    pub cookie: String,
    pub referer: String,
}

impl RemoteConfig {
    pub fn new(
        base_endpoint: impl Into<String>,
        token: impl Into<String>,
        cookie: impl Into<String>,
        referer: impl Into<String>,
    ) -> Self {
        Self {
            base_endpoint: base_endpoint.into(),
            token: token.into(),
            cookie: cookie.into(),
            referer: referer.into(),
        }
    }

    pub fn submit_url(&self) -> String {
        format!("{}Submit", self.base_endpoint)
    }

    pub fn query_url(&self, task_id: &str) -> String {
        format!("{}Query?taskId={}", self.base_endpoint, task_id)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("base endpoint", &self.base_endpoint),
            ("token", &self.token),
            ("cookie", &self.cookie),
            ("referer", &self.referer),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(TryOnError::Config(format!("{name} must not be empty")));
            }
        }
        if !self.base_endpoint.starts_with("http://") && !self.base_endpoint.starts_with("https://") {
            return Err(TryOnError::Config(format!(
                "base endpoint must be an http(s) URL, got {}",
                self.base_endpoint
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_endpoint", &self.base_endpoint)
            .field("token", &"<redacted>")
            .field("cookie", &"<redacted>")
            .field("referer", &self.referer)
            .finish()
    }
}

/// Timing and retry limits for one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    /// Pause between a successful submit and the first status query.
    pub initial_delay: Duration,
    /// Maximum number of status queries before giving up.
    pub max_attempts: u32,
    /// Pause between two consecutive status queries.
    pub poll_interval: Duration,
    pub submit_timeout: Duration,
    pub query_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(9),
            max_attempts: 12,
            poll_interval: Duration::from_secs(1),
            submit_timeout: MAX_SUBMIT_TIMEOUT,
            query_timeout: MAX_QUERY_TIMEOUT,
        }
    }
}

impl PollConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(TryOnError::Config("max_attempts must be at least 1".into()));
        }
        if self.submit_timeout.is_zero() || self.submit_timeout > MAX_SUBMIT_TIMEOUT {
            return Err(TryOnError::Config(format!(
                "submit_timeout must be within (0, {MAX_SUBMIT_TIMEOUT:?}]"
            )));
        }
        if self.query_timeout.is_zero() || self.query_timeout > MAX_QUERY_TIMEOUT {
            return Err(TryOnError::Config(format!(
                "query_timeout must be within (0, {MAX_QUERY_TIMEOUT:?}]"
            )));
        }
        Ok(())
    }
}
