//! API routes.

use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::planner::{
    create_post, delete_post, get_next_slot, get_planner_metrics, list_posts, update_post_status,
};
use crate::handlers::publish::publish_video;
use crate::handlers::scripts::{create_script, get_hashtags};
use crate::handlers::videos::{get_latest_video, render_video, stream_video};
use crate::handlers::{health, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let script_routes = Router::new()
        .route("/scripts", post(create_script))
        .route("/hashtags", get(get_hashtags));

    let video_routes = Router::new()
        .route("/videos/render", post(render_video))
        .route("/videos/latest", get(get_latest_video))
        .route("/videos/:video_id/file", get(stream_video));

    // The publish proxy: one POST, three upstream calls
    let publish_routes = Router::new().route("/tiktok/publish", post(publish_video));

    let planner_routes = Router::new()
        .route("/planner/posts", get(list_posts).post(create_post))
        .route("/planner/posts/:post_id/status", patch(update_post_status))
        .route("/planner/posts/:post_id", delete(delete_post))
        .route("/planner/metrics", get(get_planner_metrics))
        .route("/planner/next-slot", get(get_next_slot));

    // Create rate limiter for API routes
    let rate_limiter = std::sync::Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(script_routes)
        .merge(video_routes)
        .merge(publish_routes)
        .merge(planner_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Request body cap sized for video uploads
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
