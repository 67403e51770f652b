//! Publish proxy handler.
//!
//! Accepts the multipart form the frontend posts and runs the three-call
//! publish sequence. No retries: the first upstream rejection is relayed
//! with its original status and body.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use snapreel_models::{
    append_missing_hashtags, extension_for_content_type, schedule_epoch, DEFAULT_VIDEO_CONTENT_TYPE,
};
use snapreel_tiktok::PublishJob;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Successful publish response.
#[derive(Serialize)]
pub struct PublishResponse {
    pub success: bool,
    pub publish_id: String,
    pub status: String,
}

/// Publish an uploaded video through the platform API.
///
/// Multipart fields: `access_token`, `caption`, `tiktok_user_id`, `video`
/// (file, required), `schedule_time` (optional ISO timestamp), `file_name`
/// (optional), `hashtags` (optional, whitespace-separated; tags not already
/// mentioned in the caption are appended to it).
pub async fn publish_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<PublishResponse>> {
    let mut access_token = None;
    let mut caption = None;
    let mut schedule_time: Option<String> = None;
    let mut tiktok_user_id = None;
    let mut explicit_file_name: Option<String> = None;
    let mut hashtags_raw: Option<String> = None;
    let mut video: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "access_token" => access_token = Some(read_text(field).await?),
            "caption" => caption = Some(read_text(field).await?),
            "schedule_time" => schedule_time = Some(read_text(field).await?),
            "tiktok_user_id" => tiktok_user_id = Some(read_text(field).await?),
            "file_name" => explicit_file_name = Some(read_text(field).await?),
            "hashtags" => hashtags_raw = Some(read_text(field).await?),
            "video" => {
                let content_type = field.content_type().map(|ct| ct.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read video: {e}")))?;
                video = Some((bytes.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let (access_token, caption, tiktok_user_id, (video_bytes, video_content_type)) =
        match (access_token, caption, tiktok_user_id, video) {
            (Some(token), Some(caption), Some(user_id), Some(video))
                if !token.is_empty() && !user_id.is_empty() =>
            {
                (token, caption, user_id, video)
            }
            _ => return Err(ApiError::bad_request("Missing required fields")),
        };

    let caption = match hashtags_raw {
        Some(raw) => {
            let tags: Vec<String> = raw.split_whitespace().map(String::from).collect();
            append_missing_hashtags(&caption, &tags)
        }
        None => caption,
    };

    let content_type =
        video_content_type.unwrap_or_else(|| DEFAULT_VIDEO_CONTENT_TYPE.to_string());

    let schedule_time = schedule_time
        .as_deref()
        .and_then(|raw| schedule_epoch(raw, Utc::now()));

    let file_name = explicit_file_name.filter(|name| !name.is_empty()).unwrap_or_else(|| {
        format!(
            "snapreel-{}.{}",
            Utc::now().timestamp_millis(),
            extension_for_content_type(&content_type)
        )
    });

    let job = PublishJob {
        access_token,
        open_id: tiktok_user_id,
        caption,
        schedule_time,
        video: video_bytes,
        content_type,
        file_name,
    };

    let receipt = match state.tiktok.publish(&job).await {
        Ok(receipt) => receipt,
        Err(e) => {
            metrics::record_publish("failed");
            return Err(e.into());
        }
    };
    metrics::record_publish("succeeded");

    Ok(Json(PublishResponse {
        success: true,
        publish_id: receipt.publish_id,
        status: receipt.status,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {e}")))
}
