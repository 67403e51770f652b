//! Application state.

use std::sync::Arc;

use snapreel_media::MotionComposer;
use snapreel_store::PlannerStore;
use snapreel_tiktok::TikTokClient;

use crate::config::ApiConfig;
use crate::registry::RenderRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<PlannerStore>,
    pub tiktok: Arc<TikTokClient>,
    pub composer: Arc<MotionComposer>,
    pub renders: Arc<RenderRegistry>,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let store = PlannerStore::open(config.planner_path()).await?;
        let tiktok = TikTokClient::from_env()?;
        let composer = MotionComposer::new(config.composer_config());

        Ok(Self {
            config,
            store: Arc::new(store),
            tiktok: Arc::new(tiktok),
            composer: Arc::new(composer),
            renders: Arc::new(RenderRegistry::new()),
        })
    }
}
