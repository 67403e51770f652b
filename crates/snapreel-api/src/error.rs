//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use snapreel_tiktok::PublishError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    /// Upstream publish rejection relayed with its original status and body.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    #[error("Media error: {0}")]
    Media(#[from] snapreel_media::MediaError),

    #[error("Store error: {0}")]
    Store(#[from] snapreel_store::StoreError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            // An uploaded image that fails to decode is the caller's problem
            ApiError::Media(snapreel_media::MediaError::InvalidImage(_)) => StatusCode::BAD_REQUEST,
            ApiError::Media(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(snapreel_store::StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::InitRejected {
                status,
                message,
                details,
            }
            | PublishError::SubmitRejected {
                status,
                message,
                details,
            } => ApiError::Upstream {
                status,
                message,
                details,
            },
            PublishError::UploadRejected { status, details } => ApiError::Upstream {
                status,
                message: "TikTok upload failed".to_string(),
                details: serde_json::Value::String(details),
            },
            PublishError::MissingUploadInfo { details } => ApiError::Upstream {
                status: 502,
                message: "TikTok response missing upload info".to_string(),
                details,
            },
            PublishError::Network(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let error = match &self {
            ApiError::Internal(_) | ApiError::Media(_) | ApiError::Store(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
                    && status == StatusCode::INTERNAL_SERVER_ERROR
                {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let details = match &self {
            ApiError::Upstream { details, .. } => Some(details.clone()),
            _ => None,
        };

        let body = ErrorResponse { error, details };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_relayed() {
        let err = ApiError::Upstream {
            status: 403,
            message: "scope missing".to_string(),
            details: serde_json::json!({"message": "scope missing"}),
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let bad_status = ApiError::Upstream {
            status: 99,
            message: "weird".to_string(),
            details: serde_json::Value::Null,
        };
        assert_eq!(bad_status.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::Store(snapreel_store::StoreError::NotFound(uuid::Uuid::new_v4()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_image_maps_to_400() {
        let err = ApiError::Media(snapreel_media::MediaError::invalid_image("not an image"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
