//! Publish error types.

use thiserror::Error;

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors from the three-call publish sequence.
///
/// Rejection variants keep the upstream status and body so callers can relay
/// them unchanged.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("TikTok init failed ({status}): {message}")]
    InitRejected {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    #[error("TikTok response missing upload info")]
    MissingUploadInfo { details: serde_json::Value },

    #[error("TikTok upload failed ({status})")]
    UploadRejected { status: u16, details: String },

    #[error("TikTok submit failed ({status}): {message}")]
    SubmitRejected {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PublishError {
    /// Upstream HTTP status to relay, if the failure carries one.
    ///
    /// A successful init without upload coordinates counts as a bad gateway.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            PublishError::InitRejected { status, .. }
            | PublishError::UploadRejected { status, .. }
            | PublishError::SubmitRejected { status, .. } => Some(*status),
            PublishError::MissingUploadInfo { .. } => Some(502),
            PublishError::Network(_) => None,
        }
    }

    /// Upstream response body to relay, if one was captured.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            PublishError::InitRejected { details, .. }
            | PublishError::SubmitRejected { details, .. }
            | PublishError::MissingUploadInfo { details } => Some(details.clone()),
            PublishError::UploadRejected { details, .. } => {
                Some(serde_json::Value::String(details.clone()))
            }
            PublishError::Network(_) => None,
        }
    }
}
