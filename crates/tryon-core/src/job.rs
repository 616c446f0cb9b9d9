use std::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest seed the remote service accepts.
pub const MAX_SEED: u32 = 999_999;

/// One try-on job as sent to the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRequest {
    #[serde(rename = "humanImage")]
    pub person_image: String,
    #[serde(rename = "clothImage")]
    pub garment_image: String,
    pub seed: u32,
}

impl JobRequest {
    pub fn new(person_image: String, garment_image: String, seed: u32) -> Self {
        Self {
            person_image,
            garment_image,
            seed,
        }
    }
}

/// Identifier the remote hands back for a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending,
    /// Base64 result image.
    Success(String),
    Error(String),
}

impl JobStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Picks the seed for a run: a fresh value in `[0, MAX_SEED]` when
/// randomizing, otherwise the caller's seed (0 when absent).
pub fn choose_seed(seed: Option<u32>, randomize: bool) -> u32 {
    if randomize {
        rand::rng().random_range(0..=MAX_SEED)
    } else {
        seed.unwrap_or(0)
    }
}
