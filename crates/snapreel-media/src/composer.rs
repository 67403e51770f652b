//! Motion-video composition.
//!
//! One render is one FFmpeg pass: the filter graph from [`crate::filters`]
//! animates the portrait and burns in the text, the encoder settings here
//! turn it into a streamable H.264 clip. Rendering an exact frame count makes
//! clip length deterministic; there is no recorder to stop.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use snapreel_models::{caption_for, GeneratedScript, RenderedVideo};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::{build_motion_filter, TextLayer};
use crate::intake::SourceImage;
use crate::layout::{wrap_greedy, FontWeight};

/// Configuration for the motion composer.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Output width in pixels (default: 1080 for 9:16 portrait).
    pub width: u32,
    /// Output height in pixels (default: 1920 for 9:16 portrait).
    pub height: u32,
    /// Output frame rate (default: 30).
    pub fps: u32,
    /// Clip length in milliseconds (default: 9000).
    pub duration_ms: u64,
    /// How far the Ken Burns zoom travels over the clip (default: 0.12).
    pub zoom_amount: f64,
    /// Alpha of the portrait over the base fill (default: 0.92).
    pub image_alpha: f64,
    /// Base fill and gradient color (default: slate `0x0f172a`).
    pub background: String,
    /// Fraction of the canvas width text may occupy (default: 0.84).
    pub text_width_frac: f32,
    /// Regular font file for body and footer text.
    pub font_file: PathBuf,
    /// Bold font file for hook and CTA text.
    pub font_file_bold: PathBuf,
    /// x264 CRF (default: 23).
    pub crf: u8,
    /// x264 preset (default: veryfast).
    pub preset: String,
    /// Kill the encode after this many seconds (default: 120).
    pub timeout_secs: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            duration_ms: 9000,
            zoom_amount: 0.12,
            image_alpha: 0.92,
            background: "0x0f172a".to_string(),
            text_width_frac: 0.84,
            font_file: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            font_file_bold: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            crf: 23,
            preset: "veryfast".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ComposerConfig {
    /// Total frames in the clip.
    pub fn frames(&self) -> u32 {
        (self.duration_ms * self.fps as u64 / 1000) as u32
    }

    /// Clip length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Pixel width available to a text line.
    pub fn max_text_width(&self) -> f32 {
        self.width as f32 * self.text_width_frac
    }
}

/// Composes motion clips from a portrait still and a generated script.
#[derive(Debug, Clone)]
pub struct MotionComposer {
    config: ComposerConfig,
}

impl MotionComposer {
    /// Create a composer.
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Render a motion clip into `output_dir` and return its metadata.
    pub async fn render(
        &self,
        image: &SourceImage,
        script: &GeneratedScript,
        hashtags: &[String],
        output_dir: &std::path::Path,
    ) -> MediaResult<RenderedVideo> {
        for font in [&self.config.font_file, &self.config.font_file_bold] {
            if !font.exists() {
                return Err(MediaError::FontNotFound(font.clone()));
            }
        }

        tokio::fs::create_dir_all(output_dir).await?;

        // FFmpeg probes stills by extension, so keep the detected one
        let workdir = tempfile::tempdir()?;
        let source_path = workdir.path().join(format!("source.{}", image.extension()));
        tokio::fs::write(&source_path, image.bytes()).await?;

        let layers = text_layers(&self.config, script, hashtags);
        let filter = build_motion_filter(&self.config, &layers);

        let file_name = output_file_name(&script.niche, epoch_millis());
        let output_path = output_dir.join(&file_name);

        info!(
            "Rendering motion clip: {} ({}x{}, {}ms, {} text lines)",
            file_name,
            self.config.width,
            self.config.height,
            self.config.duration_ms,
            layers.iter().map(|l| l.lines.len()).sum::<usize>(),
        );

        let cmd = FfmpegCommand::new(&source_path, &output_path)
            .filter_complex(filter)
            .map("[vout]")
            .video_codec("libx264")
            .preset(&self.config.preset)
            .crf(self.config.crf)
            .pix_fmt("yuv420p")
            .frame_rate(self.config.fps)
            .duration(self.config.duration_secs())
            .no_audio()
            .faststart();

        FfmpegRunner::new()
            .with_timeout(self.config.timeout_secs)
            .run_with_progress(&cmd, |progress| {
                debug!(
                    "Encode progress: frame {} ({:.1}x realtime)",
                    progress.frame, progress.speed
                );
            })
            .await?;

        let size_bytes = tokio::fs::metadata(&output_path).await?.len();

        info!("Motion clip ready: {} ({} bytes)", output_path.display(), size_bytes);

        Ok(RenderedVideo {
            file_name,
            path: output_path,
            caption: caption_for(&script.hook, &script.cta, hashtags),
            hashtags: hashtags.to_vec(),
            duration_ms: self.config.duration_ms,
            width: self.config.width,
            height: self.config.height,
            size_bytes,
        })
    }
}

/// Build the text layers for a script: hook, body, CTA, hashtag footer.
fn text_layers(config: &ComposerConfig, script: &GeneratedScript, hashtags: &[String]) -> Vec<TextLayer> {
    let max_width = config.max_text_width();

    let hook = script.hook.to_uppercase();
    let mut layers = vec![
        TextLayer {
            lines: wrap_greedy(&hook, max_width, 72.0, FontWeight::SemiBold),
            top: 180,
            font_size: 72,
            line_height: 1.15,
            color: "0xf8fafc".to_string(),
            bold: true,
            shadow: true,
        },
        TextLayer {
            lines: wrap_greedy(&script.body, max_width, 44.0, FontWeight::Medium),
            top: 720,
            font_size: 44,
            line_height: 1.4,
            color: "0xe2e8f0".to_string(),
            bold: false,
            shadow: false,
        },
        TextLayer {
            lines: wrap_greedy(&script.cta, max_width, 56.0, FontWeight::Bold),
            top: 1380,
            font_size: 56,
            line_height: 1.2,
            color: "0xfacc15".to_string(),
            bold: true,
            shadow: false,
        },
    ];

    if !hashtags.is_empty() {
        layers.push(TextLayer {
            lines: vec![hashtags.join("  ")],
            top: 1680,
            font_size: 32,
            line_height: 1.0,
            color: "0xe2e8f0@0.85".to_string(),
            bold: false,
            shadow: false,
        });
    }

    layers
}

/// Output file name: slugged niche plus a millisecond timestamp.
fn output_file_name(niche: &str, epoch_ms: u128) -> String {
    format!("{}-{}.mp4", slugify(niche), epoch_ms)
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Collapse a niche into a file-name-safe slug.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for word in text.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if cleaned.is_empty() {
            continue;
        }
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&cleaned);
    }

    if slug.is_empty() {
        "reel".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> GeneratedScript {
        GeneratedScript {
            hook: "Stop scrolling if you want to grow.".to_string(),
            body: "Step 1: post daily.".to_string(),
            cta: "Follow for more.".to_string(),
            script: "…".to_string(),
            niche: "business growth".to_string(),
        }
    }

    #[test]
    fn test_config_frames() {
        let config = ComposerConfig::default();
        assert_eq!(config.frames(), 270);
        assert!((config.duration_secs() - 9.0).abs() < f64::EPSILON);
        assert!((config.max_text_width() - 907.2).abs() < 0.01);
    }

    #[test]
    fn test_text_layers_shape() {
        let config = ComposerConfig::default();
        let tags = vec!["#fyp".to_string(), "#viral".to_string()];
        let layers = text_layers(&config, &script(), &tags);

        assert_eq!(layers.len(), 4);
        // Hook is uppercased
        assert!(layers[0].lines[0].starts_with("STOP SCROLLING"));
        // Footer joins tags with two spaces
        assert_eq!(layers[3].lines, vec!["#fyp  #viral"]);
    }

    #[test]
    fn test_footer_skipped_without_hashtags() {
        let config = ComposerConfig::default();
        let layers = text_layers(&config, &script(), &[]);
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("business growth"), "business-growth");
        assert_eq!(slugify("  fitness   coaching "), "fitness-coaching");
        assert_eq!(slugify("a/b?c"), "abc");
        assert_eq!(slugify("   "), "reel");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("business growth", 1717243200000),
            "business-growth-1717243200000.mp4"
        );
    }
}
