//! Wire types for the publishing API.

use serde::{Deserialize, Serialize};

/// Post metadata sent with the init call.
#[derive(Debug, Clone, Serialize)]
pub struct PostInfo {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<i64>,
    pub disable_duet: bool,
    pub disable_comment: bool,
    pub disable_stitch: bool,
}

/// Upload source descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub source: String,
}

impl SourceInfo {
    /// Direct file upload (as opposed to pull-from-URL).
    pub fn file_upload() -> Self {
        Self {
            source: "FILE_UPLOAD".to_string(),
        }
    }
}

/// Body of the init call.
#[derive(Debug, Clone, Serialize)]
pub struct InitRequest {
    pub open_id: String,
    pub publish_id: String,
    pub post_info: PostInfo,
    pub source_info: SourceInfo,
}

/// Init response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct InitResponse {
    #[serde(default)]
    pub data: Option<InitData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Upload coordinates returned by init.
#[derive(Debug, Clone, Deserialize)]
pub struct InitData {
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub publish_id: Option<String>,
}

/// Body of the submit call.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub open_id: String,
    pub publish_id: String,
}

/// Submit response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub data: Option<SubmitData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitData {
    #[serde(default)]
    pub publish_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Everything the client needs for one publish sequence.
#[derive(Debug, Clone)]
pub struct PublishJob {
    /// Caller-supplied bearer token
    pub access_token: String,
    /// Platform user id the post belongs to
    pub open_id: String,
    /// Caption; clamped to the platform limit before sending
    pub caption: String,
    /// Publish time as epoch seconds, if scheduled
    pub schedule_time: Option<i64>,
    /// Encoded video bytes
    pub video: Vec<u8>,
    /// Content type of the video bytes
    pub content_type: String,
    /// File name sent with the upload
    pub file_name: String,
}

/// Final outcome of a successful publish sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReceipt {
    /// Platform reference for the queued post
    pub publish_id: String,
    /// Platform-reported status, `submitted` when not reported
    pub status: String,
}
