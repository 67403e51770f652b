//! Shared data models for the SnapReel pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Script generation requests and outputs
//! - Planned posts and planner metrics
//! - Rendered video metadata
//! - Caption and schedule-time utilities shared by the composer and the
//!   publish proxy

pub mod caption;
pub mod post;
pub mod schedule;
pub mod script;
pub mod video;

// Re-export common types
pub use caption::{append_missing_hashtags, caption_for, clamp_caption, title_for};
pub use post::{cadence_label, NewPlannedPost, PlannedPost, PlannerMetrics, PostStatus, StatusParseError};
pub use schedule::{next_publish_slot, parse_schedule_time, schedule_epoch, MIN_SCHEDULE_LEAD};
pub use script::{GeneratedScript, ScriptRequest};
pub use video::{extension_for_content_type, RenderedVideo, DEFAULT_VIDEO_CONTENT_TYPE};
