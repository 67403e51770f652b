//! Planner store operations.

use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use snapreel_models::{cadence_label, NewPlannedPost, PlannedPost, PlannerMetrics, PostStatus};

use crate::error::{StoreError, StoreResult};

/// File-backed planner store.
///
/// The in-memory list is the source of truth during the process lifetime;
/// every mutation rewrites the backing file through a temp-file rename so a
/// crash mid-write cannot truncate the calendar.
pub struct PlannerStore {
    path: PathBuf,
    posts: RwLock<Vec<PlannedPost>>,
}

impl PlannerStore {
    /// Open a store, loading any existing calendar file.
    ///
    /// A missing file starts an empty calendar; an unreadable one is logged
    /// and ignored rather than blocking startup.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let posts = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<PlannedPost>>(&bytes) {
                Ok(posts) => {
                    info!("Loaded {} planned posts from {}", posts.len(), path.display());
                    posts
                }
                Err(e) => {
                    warn!("Failed to parse planner file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            posts: RwLock::new(posts),
        })
    }

    /// All planned posts, newest first.
    pub async fn list(&self) -> Vec<PlannedPost> {
        self.posts.read().await.clone()
    }

    /// Create a new draft entry at the front of the list.
    pub async fn create(&self, new: NewPlannedPost) -> StoreResult<PlannedPost> {
        let post = PlannedPost::from_new(new);

        let mut posts = self.posts.write().await;
        posts.insert(0, post.clone());
        self.persist(&posts).await?;

        Ok(post)
    }

    /// Move a post to a new pipeline stage.
    pub async fn set_status(&self, id: Uuid, status: PostStatus) -> StoreResult<PlannedPost> {
        let mut posts = self.posts.write().await;

        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(StoreError::NotFound(id))?;
        post.status = status;
        let updated = post.clone();

        self.persist(&posts).await?;
        Ok(updated)
    }

    /// Delete a post.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut posts = self.posts.write().await;

        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(StoreError::NotFound(id));
        }

        self.persist(&posts).await
    }

    /// Derived display metrics.
    pub async fn metrics(&self) -> PlannerMetrics {
        let posts = self.posts.read().await;

        let total = posts.len();
        let scheduled = posts.iter().filter(|p| p.status == PostStatus::Scheduled).count();
        let posted = posts.iter().filter(|p| p.status == PostStatus::Posted).count();
        let any_scheduled = posts.iter().any(|p| p.schedule_at.is_some());

        PlannerMetrics {
            total,
            scheduled,
            posted,
            cadence: cadence_label(total, any_scheduled),
        }
    }

    /// Rewrite the backing file atomically.
    async fn persist(&self, posts: &[PlannedPost]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(posts)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_post(idea: &str) -> NewPlannedPost {
        NewPlannedPost {
            idea: idea.to_string(),
            hook: "I make $540/day while doing nothing".to_string(),
            cta: "Comment 'START' for the blueprint".to_string(),
            schedule_at: Some(Utc::now()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::open(dir.path().join("planner.json")).await.unwrap();

        store.create(new_post("first")).await.unwrap();
        store.create(new_post("second")).await.unwrap();

        let posts = store.list().await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].idea, "second");
        assert_eq!(posts[1].idea, "first");
        assert_eq!(posts[0].status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.json");

        let created = {
            let store = PlannerStore::open(&path).await.unwrap();
            store.create(new_post("persisted")).await.unwrap()
        };

        let reopened = PlannerStore::open(&path).await.unwrap();
        let posts = reopened.list().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, created.id);
        assert_eq!(posts[0].idea, "persisted");
    }

    #[tokio::test]
    async fn test_set_status_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::open(dir.path().join("planner.json")).await.unwrap();

        let post = store.create(new_post("idea")).await.unwrap();

        let updated = store.set_status(post.id, PostStatus::Scheduled).await.unwrap();
        assert_eq!(updated.status, PostStatus::Scheduled);

        store.delete(post.id).await.unwrap();
        assert!(store.list().await.is_empty());

        // Both operations reject unknown ids
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.set_status(missing, PostStatus::Posted).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete(missing).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = PlannerStore::open(&path).await.unwrap();
        assert!(store.list().await.is_empty());

        // And recovers on the next write
        store.create(new_post("fresh")).await.unwrap();
        let reopened = PlannerStore::open(&path).await.unwrap();
        assert_eq!(reopened.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::open(dir.path().join("planner.json")).await.unwrap();

        for i in 0..3 {
            store.create(new_post(&format!("idea {i}"))).await.unwrap();
        }
        let posts = store.list().await;
        store.set_status(posts[0].id, PostStatus::Scheduled).await.unwrap();
        store.set_status(posts[1].id, PostStatus::Posted).await.unwrap();

        let metrics = store.metrics().await;
        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.scheduled, 1);
        assert_eq!(metrics.posted, 1);
        assert_eq!(metrics.cadence, "0.4/day");
    }
}
