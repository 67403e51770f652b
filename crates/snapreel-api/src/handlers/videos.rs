//! Motion-video render and delivery handlers.

use std::time::Instant;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, Response, StatusCode};
use axum::Json;
use serde::Serialize;

use snapreel_media::SourceImage;
use snapreel_models::{GeneratedScript, RenderedVideo};
use snapreel_script::lookup_hashtags;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Render response metadata (the bytes are fetched separately).
#[derive(Serialize)]
pub struct RenderResponse {
    pub video_id: String,
    pub file_name: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub duration_ms: u64,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

impl RenderResponse {
    fn from_video(video_id: String, video: &RenderedVideo) -> Self {
        Self {
            video_id,
            file_name: video.file_name.clone(),
            caption: video.caption.clone(),
            hashtags: video.hashtags.clone(),
            duration_ms: video.duration_ms,
            width: video.width,
            height: video.height,
            size_bytes: video.size_bytes,
        }
    }
}

/// Render a motion video from an uploaded portrait and a script.
///
/// Multipart fields: `image` (file, required), `niche`, `hook`, `body`,
/// `cta` (required), `hashtags` (optional, whitespace-separated; defaults to
/// the niche lookup).
pub async fn render_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<RenderResponse>> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut niche = None;
    let mut hook = None;
    let mut body = None;
    let mut cta = None;
    let mut hashtags_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read image: {e}")))?;
                image = Some((file_name, bytes.to_vec()));
            }
            "niche" => niche = Some(read_text(field).await?),
            "hook" => hook = Some(read_text(field).await?),
            "body" => body = Some(read_text(field).await?),
            "cta" => cta = Some(read_text(field).await?),
            "hashtags" => hashtags_raw = Some(read_text(field).await?),
            _ => {}
        }
    }

    let ((file_name, bytes), niche, hook, body, cta) = match (image, niche, hook, body, cta) {
        (Some(image), Some(niche), Some(hook), Some(body), Some(cta))
            if !niche.is_empty() && !hook.is_empty() =>
        {
            (image, niche, hook, body, cta)
        }
        _ => return Err(ApiError::bad_request("Missing required fields")),
    };

    let hashtags: Vec<String> = match hashtags_raw.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => raw.split_whitespace().map(String::from).collect(),
        None => lookup_hashtags(&niche),
    };

    let source = SourceImage::from_bytes(file_name, bytes)?;

    let script = GeneratedScript {
        script: GeneratedScript::join(&hook, &body, &cta),
        hook,
        body,
        cta,
        niche,
    };

    let started = Instant::now();
    let video = match state
        .composer
        .render(&source, &script, &hashtags, &state.config.render_dir())
        .await
    {
        Ok(video) => video,
        Err(e) => {
            metrics::record_render("failed", started.elapsed().as_secs_f64());
            return Err(e.into());
        }
    };
    metrics::record_render("completed", started.elapsed().as_secs_f64());

    let video_id = state.renders.put(video.clone()).await;

    Ok(Json(RenderResponse::from_video(video_id, &video)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {e}")))
}

/// Metadata of the current render.
pub async fn get_latest_video(State(state): State<AppState>) -> ApiResult<Json<RenderResponse>> {
    let (video_id, video) = state
        .renders
        .latest()
        .await
        .ok_or_else(|| ApiError::not_found("No video rendered yet"))?;

    Ok(Json(RenderResponse::from_video(video_id, &video)))
}

/// Stream the rendered MP4.
pub async fn stream_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Response<Body>> {
    let video = state
        .renders
        .get(&video_id)
        .await
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    let bytes = tokio::fs::read(&video.path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::not_found("Video file no longer exists")
        } else {
            ApiError::internal(format!("Failed to read video file: {e}"))
        }
    })?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", video.file_name),
        )
        // Renders are transient; the next one evicts this file
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}
