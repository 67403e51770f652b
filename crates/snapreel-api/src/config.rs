//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Max request body size (must fit an uploaded video)
    pub max_body_size: usize,
    /// Directory for the planner file and rendered clips
    pub data_dir: PathBuf,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 64 * 1024 * 1024, // 64MB
            data_dir: PathBuf::from("./data"),
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024 * 1024),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Where the planner calendar lives.
    pub fn planner_path(&self) -> PathBuf {
        self.data_dir.join("planner.json")
    }

    /// Where rendered clips land.
    pub fn render_dir(&self) -> PathBuf {
        self.data_dir.join("renders")
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// Composer configuration, with font paths overridable via environment.
    pub fn composer_config(&self) -> snapreel_media::ComposerConfig {
        let mut config = snapreel_media::ComposerConfig::default();
        if let Ok(font) = std::env::var("FONT_FILE") {
            config.font_file = PathBuf::from(font);
        }
        if let Ok(font) = std::env::var("FONT_FILE_BOLD") {
            config.font_file_bold = PathBuf::from(font);
        }
        if let Some(timeout) = std::env::var("RENDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        config
    }

    /// Shared request timeout for handlers that need one.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            std::env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        )
    }
}
