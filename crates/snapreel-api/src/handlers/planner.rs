//! Planner handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use snapreel_models::{next_publish_slot, NewPlannedPost, PlannedPost, PlannerMetrics};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List planned posts, newest first.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<PlannedPost>> {
    Json(state.store.list().await)
}

/// Create a planned post.
pub async fn create_post(
    State(state): State<AppState>,
    Json(new): Json<NewPlannedPost>,
) -> ApiResult<(StatusCode, Json<PlannedPost>)> {
    new.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let post = state.store.create(new).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Status update request.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Move a post to a new pipeline stage.
pub async fn update_post_status(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> ApiResult<Json<PlannedPost>> {
    let status = request
        .status
        .parse()
        .map_err(|e: snapreel_models::StatusParseError| ApiError::bad_request(e.to_string()))?;

    let post = state.store.set_status(post_id, status).await?;
    Ok(Json(post))
}

/// Delete a planned post.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.delete(post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Derived planner display metrics.
pub async fn get_planner_metrics(State(state): State<AppState>) -> Json<PlannerMetrics> {
    Json(state.store.metrics().await)
}

/// Suggested default publish slot.
#[derive(Serialize)]
pub struct NextSlotResponse {
    pub schedule_at: DateTime<Utc>,
}

/// Six hours from now, on the hour.
pub async fn get_next_slot() -> Json<NextSlotResponse> {
    Json(NextSlotResponse {
        schedule_at: next_publish_slot(Utc::now()),
    })
}
