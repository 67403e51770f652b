//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "snapreel_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "snapreel_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "snapreel_http_requests_in_flight";

    // Render metrics
    pub const RENDERS_TOTAL: &str = "snapreel_renders_total";
    pub const RENDER_DURATION_SECONDS: &str = "snapreel_render_duration_seconds";

    // Publish metrics
    pub const PUBLISH_TOTAL: &str = "snapreel_publish_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "snapreel_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completed or failed render.
pub fn record_render(outcome: &str, duration_secs: f64) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::RENDERS_TOTAL, &labels).increment(1);
    histogram!(names::RENDER_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a publish attempt outcome.
pub fn record_publish(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::PUBLISH_TOTAL, &labels).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Sanitize path for metrics labels (remove IDs, etc.).
fn sanitize_path(path: &str) -> String {
    // Replace UUIDs with placeholders
    let path = regex_lite::Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .unwrap()
        .replace_all(path, ":id");
    // Normalize video file routes
    let path = regex_lite::Regex::new(r"/videos/[a-zA-Z0-9_.:-]+/file")
        .unwrap()
        .replace_all(&path, "/videos/:video_id/file");
    // Normalize planner post routes
    let path = regex_lite::Regex::new(r"/planner/posts/[a-zA-Z0-9_.:-]+")
        .unwrap()
        .replace_all(&path, "/planner/posts/:post_id");
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    // Increment in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    // Decrement in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(
            sanitize_path("/api/videos/abc-123/file"),
            "/api/videos/:video_id/file"
        );
        assert_eq!(
            sanitize_path("/api/planner/posts/550e8400-e29b-41d4-a716-446655440000"),
            "/api/planner/posts/:post_id"
        );
        assert_eq!(sanitize_path("/api/planner/metrics"), "/api/planner/metrics");
    }
}
