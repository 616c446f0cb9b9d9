use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tryon_core::{PollConfig, RemoteConfig};
use crate::error::AppError;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub remote: RemoteConfig,
    pub poll: PollConfig,
    /// Overall budget for one request, including the initial delay and all polls.
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Reads `.env` when present, then the process environment.
    pub fn load() -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        Ok(Self::from_lookup(|key| env::var(key).ok())?)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        let remote = RemoteConfig::new(
            normalize_endpoint(&required("tryon_url")?),
            required("token")?,
            required("Cookie")?,
            required("referer")?,
        );
        remote.validate().map_err(|e| AppError::Config(e.to_string()))?;

        let defaults = PollConfig::default();
        let poll = PollConfig {
            initial_delay: parse_or(&lookup, "TRYON_INITIAL_DELAY_SECS", defaults.initial_delay.as_secs())
                .map(Duration::from_secs)?,
            max_attempts: parse_or(&lookup, "TRYON_MAX_ATTEMPTS", defaults.max_attempts)?,
            poll_interval: parse_or(&lookup, "TRYON_POLL_INTERVAL_SECS", defaults.poll_interval.as_secs())
                .map(Duration::from_secs)?,
            ..defaults
        };
        poll.validate().map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            remote,
            poll,
            request_timeout: parse_or(&lookup, "TRYON_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
                .map(Duration::from_secs)?,
            max_upload_bytes: parse_or(&lookup, "TRYON_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a number, got {raw:?}"))),
        _ => Ok(default),
    }
}

/// `tryon_url` is usually given as `host[:port]/path/` without a scheme.
fn normalize_endpoint(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}
