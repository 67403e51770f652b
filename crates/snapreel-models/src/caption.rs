//! Caption assembly for the publish flow.
//!
//! The platform caps descriptions at 2200 characters and shows the first
//! 42 characters as the post title.

/// Maximum characters the platform accepts in a description.
pub const MAX_CAPTION_CHARS: usize = 2200;

/// Maximum characters shown as the post title.
pub const MAX_TITLE_CHARS: usize = 42;

/// Title used when the caption is empty.
pub const FALLBACK_TITLE: &str = "Automated TikTok Drop";

/// Build the default caption for a rendered video: hook, CTA and hashtags.
pub fn caption_for(hook: &str, cta: &str, hashtags: &[String]) -> String {
    format!("{} {} {}", hook, cta, hashtags.join(" "))
        .trim()
        .to_string()
}

/// Derive the post title from a caption.
pub fn title_for(caption: &str) -> String {
    let title: String = caption.chars().take(MAX_TITLE_CHARS).collect();
    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}

/// Clamp a caption to the platform's description limit.
pub fn clamp_caption(caption: &str) -> String {
    caption.chars().take(MAX_CAPTION_CHARS).collect()
}

/// Append hashtags that are not already mentioned in the caption.
///
/// A tag counts as mentioned when its bare word (without `#`) appears in the
/// caption case-insensitively, matching what a viewer would read.
pub fn append_missing_hashtags(caption: &str, hashtags: &[String]) -> String {
    let lowered = caption.to_lowercase();
    let missing: Vec<&str> = hashtags
        .iter()
        .filter(|tag| {
            let bare = tag.trim_start_matches('#').to_lowercase();
            !bare.is_empty() && !lowered.contains(&bare)
        })
        .map(|tag| tag.as_str())
        .collect();

    format!("{} {}", caption.trim(), missing.join(" "))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_caption_for() {
        let caption = caption_for(
            "Stop scrolling.",
            "Follow for more.",
            &tags(&["#fyp", "#viral"]),
        );
        assert_eq!(caption, "Stop scrolling. Follow for more. #fyp #viral");
    }

    #[test]
    fn test_title_truncation() {
        let long = "a".repeat(100);
        assert_eq!(title_for(&long).chars().count(), MAX_TITLE_CHARS);
        assert_eq!(title_for(""), FALLBACK_TITLE);
        assert_eq!(title_for("short"), "short");
    }

    #[test]
    fn test_clamp_caption() {
        let long = "x".repeat(MAX_CAPTION_CHARS + 50);
        assert_eq!(clamp_caption(&long).chars().count(), MAX_CAPTION_CHARS);
    }

    #[test]
    fn test_append_missing_hashtags_skips_mentioned() {
        let caption = "Daily fyp content";
        let result = append_missing_hashtags(caption, &tags(&["#fyp", "#viral"]));
        assert_eq!(result, "Daily fyp content #viral");
    }

    #[test]
    fn test_append_missing_hashtags_empty_caption() {
        let result = append_missing_hashtags("  ", &tags(&["#fyp"]));
        assert_eq!(result, "#fyp");
    }
}
