//! FFmpeg CLI wrapper and motion-video composer.
//!
//! This crate turns a portrait still plus a generated script into a 9:16
//! motion clip: cover-fit Ken Burns zoom, bottom gradient, word-wrapped text
//! layers and a hashtag footer, encoded in a single FFmpeg pass.

pub mod command;
pub mod composer;
pub mod error;
pub mod filters;
pub mod intake;
pub mod layout;
pub mod progress;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use composer::{slugify, ComposerConfig, MotionComposer};
pub use error::{MediaError, MediaResult};
pub use filters::{build_motion_filter, escape_drawtext, TextLayer};
pub use intake::SourceImage;
pub use layout::{estimate_text_width, wrap_greedy, FontWeight};
pub use progress::FfmpegProgress;
