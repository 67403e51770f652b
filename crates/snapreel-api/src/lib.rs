//! Axum HTTP API server.
//!
//! This crate provides:
//! - Script generation and hashtag lookup endpoints
//! - The motion-video render endpoint and rendered-file delivery
//! - The publish proxy route (init → upload → submit pass-through)
//! - Planner CRUD over the JSON-file store
//! - Rate limiting, security headers and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod registry;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use registry::RenderRegistry;
pub use routes::create_router;
pub use state::AppState;
