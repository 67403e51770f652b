//! Registry for the current rendered video.
//!
//! The pipeline keeps exactly one render alive at a time: registering a new
//! one deletes the superseded file, the way the browser original revoked the
//! previous object URL.

use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use snapreel_models::RenderedVideo;

/// Holds the latest render and its retrieval id.
#[derive(Default)]
pub struct RenderRegistry {
    latest: Mutex<Option<(String, RenderedVideo)>>,
}

impl RenderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a finished render, evicting the previous one.
    ///
    /// Returns the retrieval id for the new render.
    pub async fn put(&self, video: RenderedVideo) -> String {
        let id = Uuid::new_v4().to_string();

        let mut slot = self.latest.lock().await;
        if let Some((old_id, old)) = slot.take() {
            debug!("Evicting superseded render {}", old_id);
            if let Err(e) = tokio::fs::remove_file(&old.path).await {
                warn!("Failed to delete superseded render {}: {}", old.path.display(), e);
            }
        }
        *slot = Some((id.clone(), video));

        id
    }

    /// The latest render, if any.
    pub async fn latest(&self) -> Option<(String, RenderedVideo)> {
        self.latest.lock().await.clone()
    }

    /// Look up a render by id.
    pub async fn get(&self, id: &str) -> Option<RenderedVideo> {
        self.latest
            .lock()
            .await
            .as_ref()
            .filter(|(current_id, _)| current_id.as_str() == id)
            .map(|(_, video)| video.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    async fn video_at(path: &Path) -> RenderedVideo {
        tokio::fs::write(path, b"fake mp4").await.unwrap();
        RenderedVideo {
            file_name: path.file_name().unwrap().to_string_lossy().to_string(),
            path: path.to_path_buf(),
            caption: "caption".to_string(),
            hashtags: vec!["#fyp".to_string()],
            duration_ms: 9000,
            width: 1080,
            height: 1920,
            size_bytes: 8,
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RenderRegistry::new();

        let id = registry.put(video_at(&dir.path().join("a.mp4")).await).await;
        assert!(registry.get(&id).await.is_some());
        assert!(registry.get("unknown").await.is_none());

        let (latest_id, _) = registry.latest().await.unwrap();
        assert_eq!(latest_id, id);
    }

    #[tokio::test]
    async fn test_put_evicts_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RenderRegistry::new();

        let first_path = dir.path().join("first.mp4");
        let first_id = registry.put(video_at(&first_path).await).await;
        let second_id = registry.put(video_at(&dir.path().join("second.mp4")).await).await;

        // Old file is gone and its id no longer resolves
        assert!(!first_path.exists());
        assert!(registry.get(&first_id).await.is_none());
        assert!(registry.get(&second_id).await.is_some());
    }
}
