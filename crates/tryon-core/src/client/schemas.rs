use serde::Deserialize;

/// Envelope shared by the Submit and Query responses.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteEnvelope {
    pub result: RemoteResult,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteResult {
    pub status: String,
    /// Job id on submit, base64 image on a successful query.
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    /// Non-empty `result` field.
    pub fn value(&self) -> Option<&str> {
        self.result.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}
