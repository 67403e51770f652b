//! Script generation and hashtag lookup handlers.

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use snapreel_models::{GeneratedScript, ScriptRequest};
use snapreel_script::{generate_script, lookup_hashtags};

use crate::error::{ApiError, ApiResult};

/// Script generation response.
#[derive(Serialize)]
pub struct ScriptResponse {
    pub script: GeneratedScript,
    pub hashtags: Vec<String>,
}

/// Generate a script and matching hashtags.
pub async fn create_script(Json(request): Json<ScriptRequest>) -> ApiResult<Json<ScriptResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let script = generate_script(&request);
    let hashtags = lookup_hashtags(&request.niche);

    Ok(Json(ScriptResponse { script, hashtags }))
}

/// Hashtag lookup query.
#[derive(Deserialize)]
pub struct HashtagQuery {
    #[serde(default)]
    pub niche: String,
}

/// Hashtag lookup response.
#[derive(Serialize)]
pub struct HashtagResponse {
    pub hashtags: Vec<String>,
}

/// Look up hashtags for a niche.
pub async fn get_hashtags(Query(query): Query<HashtagQuery>) -> Json<HashtagResponse> {
    Json(HashtagResponse {
        hashtags: lookup_hashtags(&query.niche),
    })
}
