//! Publishing API client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use snapreel_models::{clamp_caption, title_for};

use crate::error::{PublishError, PublishResult};
use crate::types::{
    InitRequest, InitResponse, PostInfo, PublishJob, PublishReceipt, SourceInfo, SubmitRequest,
    SubmitResponse,
};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct TikTokConfig {
    /// API origin; swapped out for a local server in tests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for TikTokConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.tiktokapis.com".to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TikTokConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("TIKTOK_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(default.base_url),
            timeout: Duration::from_secs(
                std::env::var("TIKTOK_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            connect_timeout: default.connect_timeout,
        }
    }
}

/// Publishing API client.
#[derive(Debug, Clone)]
pub struct TikTokClient {
    http: Client,
    config: TikTokConfig,
}

impl TikTokClient {
    /// Create a new client.
    pub fn new(config: TikTokConfig) -> PublishResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("snapreel-tiktok/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(PublishError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> PublishResult<Self> {
        Self::new(TikTokConfig::from_env())
    }

    fn init_url(&self) -> String {
        format!("{}/v2/post/publish/video/init/", self.config.base_url)
    }

    fn submit_url(&self) -> String {
        format!("{}/v2/post/publish/video/submit/", self.config.base_url)
    }

    /// Run the full publish sequence: init, upload, submit.
    ///
    /// The sequence short-circuits on the first non-success response. There
    /// are no retries; a partially completed sequence is simply abandoned.
    pub async fn publish(&self, job: &PublishJob) -> PublishResult<PublishReceipt> {
        let (upload_url, publish_id) = self.init(job).await?;
        self.upload(job, &upload_url).await?;
        self.submit(job, publish_id).await
    }

    /// Initialize the upload and return the upload URL and publish id.
    async fn init(&self, job: &PublishJob) -> PublishResult<(String, String)> {
        let caption = clamp_caption(&job.caption);
        let body = InitRequest {
            open_id: job.open_id.clone(),
            publish_id: job.file_name.clone(),
            post_info: PostInfo {
                title: title_for(&caption),
                description: caption,
                schedule_time: job.schedule_time,
                disable_duet: false,
                disable_comment: false,
                disable_stitch: false,
            },
            source_info: SourceInfo::file_upload(),
        };

        debug!("Initializing publish for {}", job.file_name);

        let response = self
            .http
            .post(self.init_url())
            .bearer_auth(&job.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let details = parse_body(&text);

        if !status.is_success() {
            return Err(PublishError::InitRejected {
                status: status.as_u16(),
                message: message_from(&details, "TikTok init failed"),
                details,
            });
        }

        let parsed: InitResponse = serde_json::from_value(details.clone()).unwrap_or(InitResponse {
            data: None,
            message: None,
        });

        let data = parsed.data.unwrap_or(crate::types::InitData {
            upload_url: None,
            publish_id: None,
        });

        match (data.upload_url, data.publish_id) {
            (Some(upload_url), Some(publish_id)) => {
                info!("Publish initialized: {}", publish_id);
                Ok((upload_url, publish_id))
            }
            _ => Err(PublishError::MissingUploadInfo { details }),
        }
    }

    /// PUT the video bytes to the short-lived upload URL.
    async fn upload(&self, job: &PublishJob, upload_url: &str) -> PublishResult<()> {
        debug!("Uploading {} bytes to publish endpoint", job.video.len());

        let response = self
            .http
            .put(upload_url)
            .header("Content-Type", &job.content_type)
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", job.file_name),
            )
            .body(job.video.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(PublishError::UploadRejected {
                status: status.as_u16(),
                details,
            });
        }

        info!("Video uploaded ({} bytes)", job.video.len());
        Ok(())
    }

    /// Submit the publish job and return the receipt.
    async fn submit(&self, job: &PublishJob, publish_id: String) -> PublishResult<PublishReceipt> {
        let body = SubmitRequest {
            open_id: job.open_id.clone(),
            publish_id: publish_id.clone(),
        };

        let response = self
            .http
            .post(self.submit_url())
            .bearer_auth(&job.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let details = parse_body(&text);

        if !status.is_success() {
            return Err(PublishError::SubmitRejected {
                status: status.as_u16(),
                message: message_from(&details, "TikTok submit failed"),
                details,
            });
        }

        let parsed: SubmitResponse =
            serde_json::from_value(details).unwrap_or(SubmitResponse {
                data: None,
                message: None,
            });
        let data = parsed.data.unwrap_or(crate::types::SubmitData {
            publish_id: None,
            status: None,
        });

        let receipt = PublishReceipt {
            publish_id: data.publish_id.unwrap_or(publish_id),
            status: data.status.unwrap_or_else(|| "submitted".to_string()),
        };

        info!("Publish submitted: {} ({})", receipt.publish_id, receipt.status);
        Ok(receipt)
    }
}

/// Parse a response body as JSON, keeping raw text when it is not JSON.
fn parse_body(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

/// Pull the upstream `message` field, with a fallback.
fn message_from(details: &serde_json::Value, fallback: &str) -> String {
    details
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job() -> PublishJob {
        PublishJob {
            access_token: "token-123".to_string(),
            open_id: "user-42".to_string(),
            caption: "Stop scrolling. Follow for more. #fyp".to_string(),
            schedule_time: Some(1_750_000_000),
            video: vec![0u8; 64],
            content_type: "video/mp4".to_string(),
            file_name: "snapreel-1.mp4".to_string(),
        }
    }

    async fn client_for(server: &MockServer) -> TikTokClient {
        TikTokClient::new(TikTokConfig {
            base_url: server.uri(),
            ..TikTokConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_publish_happy_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/init/"))
            .and(header("Authorization", "Bearer token-123"))
            .and(body_partial_json(json!({
                "open_id": "user-42",
                "post_info": {"schedule_time": 1_750_000_000},
                "source_info": {"source": "FILE_UPLOAD"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "upload_url": format!("{}/upload/abc", server.uri()),
                    "publish_id": "pub-1",
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/upload/abc"))
            .and(header("Content-Type", "video/mp4"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/submit/"))
            .and(body_partial_json(json!({"publish_id": "pub-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"publish_id": "pub-1", "status": "PROCESSING_UPLOAD"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client_for(&server).await.publish(&job()).await.unwrap();
        assert_eq!(receipt.publish_id, "pub-1");
        assert_eq!(receipt.status, "PROCESSING_UPLOAD");
    }

    #[tokio::test]
    async fn test_publish_short_circuits_on_init_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/init/"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        // Submit must never be reached
        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/submit/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).await.publish(&job()).await.unwrap_err();
        match err {
            PublishError::InitRejected { status, message, .. } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_fails_on_missing_upload_info() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/init/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.publish(&job()).await.unwrap_err();
        assert!(matches!(err, PublishError::MissingUploadInfo { .. }));
        assert_eq!(err.http_status(), Some(502));
    }

    #[tokio::test]
    async fn test_publish_relays_upload_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/init/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "upload_url": format!("{}/upload/abc", server.uri()),
                    "publish_id": "pub-1",
                }
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/upload/abc"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage exploded"))
            .mount(&server)
            .await;

        // Submit must never be reached
        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/submit/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).await.publish(&job()).await.unwrap_err();
        match err {
            PublishError::UploadRejected { status, details } => {
                assert_eq!(status, 500);
                assert_eq!(details, "storage exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_defaults_when_fields_missing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/init/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "upload_url": format!("{}/upload/abc", server.uri()),
                    "publish_id": "pub-init",
                }
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/upload/abc"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2/post/publish/video/submit/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let receipt = client_for(&server).await.publish(&job()).await.unwrap();
        assert_eq!(receipt.publish_id, "pub-init");
        assert_eq!(receipt.status, "submitted");
    }
}
