//! FFmpeg filter graph building for the motion composer.
//!
//! The graph recreates the original canvas pass in one render: base fill,
//! cover-fit Ken Burns zoom of the portrait at reduced alpha, a bottom
//! gradient strip, then one `drawtext` per wrapped text line.

use crate::composer::ComposerConfig;

/// A block of pre-wrapped text lines to burn into the frame.
#[derive(Debug, Clone)]
pub struct TextLayer {
    /// Wrapped lines, drawn top to bottom
    pub lines: Vec<String>,
    /// Top edge of the first line in pixels
    pub top: u32,
    /// Font size in pixels
    pub font_size: u32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    /// FFmpeg color value, e.g. `0xf8fafc` or `0xe2e8f0@0.85`
    pub color: String,
    /// Use the bold face
    pub bold: bool,
    /// Draw a drop shadow behind the glyphs
    pub shadow: bool,
}

/// Escape text for a quoted `drawtext` `text=` value.
///
/// Backslashes and quotes are escaped for the filtergraph parser, `%` for
/// drawtext's own expansion syntax.
pub fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '%' => escaped.push_str("\\%"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the full filter complex for a motion render.
///
/// The input still is labeled `[0:v]`; the finished frame is `[vout]`.
pub fn build_motion_filter(config: &ComposerConfig, layers: &[TextLayer]) -> String {
    let width = config.width;
    let height = config.height;
    let frames = config.frames();
    let secs = config.duration_secs();

    // Gradient strip: transparent at 55% height, 90% alpha at the bottom
    let gradient_top = (height as f64 * 0.55).round() as u32;
    let gradient_height = height - gradient_top;

    let mut filter = format!(
        // Base fill behind the zoomed image
        "color=c={bg}:s={w}x{h}:r={fps}:d={secs:.3}[base];\
         [0:v]scale={w}:{h}:force_original_aspect_ratio=increase,\
         crop={w}:{h},\
         zoompan=z='1+{amount}*on/{last_frame}':\
         x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':\
         d={frames}:s={w}x{h}:fps={fps},\
         format=rgba,colorchannelmixer=aa={alpha}[ken];\
         [base][ken]overlay=0:0[lit];\
         gradients=s={w}x{gh}:c0={bg}00:c1={bg}e6:x0=0:y0=0:x1=0:y1={gh}:speed=0,\
         format=rgba[grad];\
         [lit][grad]overlay=0:{gy}",
        bg = config.background,
        w = width,
        h = height,
        fps = config.fps,
        secs = secs,
        amount = config.zoom_amount,
        last_frame = frames.saturating_sub(1).max(1),
        frames = frames,
        alpha = config.image_alpha,
        gh = gradient_height,
        gy = gradient_top,
    );

    let text_filters = build_text_filters(config, layers);
    if text_filters.is_empty() {
        filter.push_str("[vout]");
    } else {
        filter.push_str("[shaded];[shaded]");
        filter.push_str(&text_filters);
        filter.push_str("[vout]");
    }

    filter
}

/// Build the comma-chained `drawtext` filters for all layers.
fn build_text_filters(config: &ComposerConfig, layers: &[TextLayer]) -> String {
    let mut parts = Vec::new();

    for layer in layers {
        let font_file = if layer.bold {
            &config.font_file_bold
        } else {
            &config.font_file
        };

        for (index, line) in layer.lines.iter().enumerate() {
            let y = layer.top as f32 + index as f32 * layer.font_size as f32 * layer.line_height;

            let mut drawtext = format!(
                "drawtext=fontfile='{font}':text='{text}':fontsize={size}:\
                 fontcolor={color}:x=(w-text_w)/2:y={y}",
                font = font_file.display(),
                text = escape_drawtext(line),
                size = layer.font_size,
                color = layer.color,
                y = y.round() as i64,
            );

            if layer.shadow {
                drawtext.push_str(&format!(
                    ":shadowcolor={bg}@0.85:shadowx=0:shadowy=4",
                    bg = config.background
                ));
            }

            parts.push(drawtext);
        }
    }

    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(lines: &[&str]) -> TextLayer {
        TextLayer {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            top: 180,
            font_size: 72,
            line_height: 1.15,
            color: "0xf8fafc".to_string(),
            bold: true,
            shadow: true,
        }
    }

    #[test]
    fn test_escape_drawtext() {
        assert_eq!(escape_drawtext("plain text"), "plain text");
        assert_eq!(escape_drawtext("it's 100%"), "it\\'s 100\\%");
        assert_eq!(escape_drawtext("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_build_filter_without_text() {
        let config = ComposerConfig::default();
        let filter = build_motion_filter(&config, &[]);

        assert!(filter.contains("zoompan"));
        assert!(filter.contains("gradients"));
        assert!(filter.contains("colorchannelmixer=aa=0.92"));
        assert!(filter.ends_with("[vout]"));
        assert!(!filter.contains("drawtext"));
    }

    #[test]
    fn test_build_filter_one_drawtext_per_line() {
        let config = ComposerConfig::default();
        let filter = build_motion_filter(&config, &[layer(&["STOP SCROLLING", "RIGHT NOW"])]);

        assert_eq!(filter.matches("drawtext=").count(), 2);
        assert!(filter.contains("text='STOP SCROLLING'"));
        assert!(filter.contains("shadowcolor=0x0f172a@0.85"));
        assert!(filter.ends_with("[vout]"));
    }

    #[test]
    fn test_line_offsets_follow_line_height() {
        let config = ComposerConfig::default();
        let filter = build_motion_filter(&config, &[layer(&["ONE", "TWO"])]);

        // 180 and 180 + 72 * 1.15 = 262.8 -> 263
        assert!(filter.contains(":y=180"));
        assert!(filter.contains(":y=263"));
    }

    #[test]
    fn test_gradient_covers_lower_canvas() {
        let config = ComposerConfig::default();
        let filter = build_motion_filter(&config, &[]);

        // 55% of 1920 = 1056; strip height = 864
        assert!(filter.contains("overlay=0:1056"));
        assert!(filter.contains("s=1080x864"));
    }
}
