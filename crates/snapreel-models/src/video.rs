//! Rendered video metadata.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Content type assumed when the upload does not declare one.
pub const DEFAULT_VIDEO_CONTENT_TYPE: &str = "video/webm";

/// Metadata for a finished render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedVideo {
    /// Output file name, e.g. `business-growth-1717243200000.mp4`
    pub file_name: String,
    /// Where the encoded file lives on disk
    pub path: PathBuf,
    /// Default caption: hook, CTA and hashtags
    pub caption: String,
    /// Hashtags burned into the footer
    pub hashtags: Vec<String>,
    /// Clip length in milliseconds
    pub duration_ms: u64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Encoded size in bytes
    pub size_bytes: u64,
}

/// Pick a file extension for an upload content type.
///
/// Unknown types fall back to `mp4`, which the platform transcodes anyway.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    if content_type.contains("mp4") {
        "mp4"
    } else if content_type.contains("webm") {
        "webm"
    } else {
        "mp4"
    }
}
