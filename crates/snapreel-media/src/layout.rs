//! Greedy word wrapping against estimated pixel widths.
//!
//! The composer centers each text block and needs line breaks before the
//! filter graph is built, so wrapping happens here rather than in FFmpeg.
//! Widths are estimated from per-character advance classes; the estimate only
//! has to be stable and roughly proportional for the greedy fit to behave.

/// Font weights the composer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Medium,
    SemiBold,
    Bold,
}

impl FontWeight {
    /// Horizontal scale relative to the regular face.
    fn width_factor(self) -> f32 {
        match self {
            FontWeight::Regular => 1.0,
            FontWeight::Medium => 1.02,
            FontWeight::SemiBold => 1.05,
            FontWeight::Bold => 1.08,
        }
    }
}

/// Advance width of one character in em units.
fn char_advance(c: char) -> f32 {
    match c {
        ' ' => 0.30,
        'i' | 'l' | 'j' | '\'' | '.' | ',' | ':' | ';' | '!' | '|' => 0.30,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.40,
        'm' | 'w' | 'M' | 'W' => 0.85,
        '@' => 0.95,
        '#' => 0.62,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_digit() => 0.55,
        _ => 0.52,
    }
}

/// Estimate the rendered width of `text` in pixels.
pub fn estimate_text_width(text: &str, font_size: f32, weight: FontWeight) -> f32 {
    let em: f32 = text.chars().map(char_advance).sum();
    em * font_size * weight.width_factor()
}

/// Break `text` into lines by greedy word fit.
///
/// Words are packed onto the current line until adding the next one would
/// exceed `max_width`; the line is then flushed and the word starts the next
/// one. A single word wider than `max_width` gets its own line unbroken;
/// there is no hyphenation.
pub fn wrap_greedy(text: &str, max_width: f32, font_size: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if estimate_text_width(&candidate, font_size, weight) > max_width {
            if !current.is_empty() {
                lines.push(current);
            }
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f32 = 907.2; // 84% of a 1080px canvas

    #[test]
    fn test_width_grows_with_text() {
        let short = estimate_text_width("hi", 44.0, FontWeight::Regular);
        let long = estimate_text_width("hi there friend", 44.0, FontWeight::Regular);
        assert!(long > short);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = estimate_text_width("MOMENTUM", 72.0, FontWeight::Regular);
        let bold = estimate_text_width("MOMENTUM", 72.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        let lines = wrap_greedy("Follow for more", MAX, 56.0, FontWeight::Bold);
        assert_eq!(lines, vec!["Follow for more"]);
    }

    #[test]
    fn test_lines_fit_max_width() {
        let text = "Step 1: hook viewers with a quick payoff. Next, layer authority \
                    with proof or data to keep momentum. Now drop a bold call-to-action \
                    so the algorithm keeps pushing you.";
        let lines = wrap_greedy(text, MAX, 44.0, FontWeight::Medium);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                estimate_text_width(line, 44.0, FontWeight::Medium) <= MAX,
                "line too wide: {line}"
            );
        }
        // No words lost or reordered
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let word = "a".repeat(200);
        let text = format!("short {} tail", word);
        let lines = wrap_greedy(&text, MAX, 44.0, FontWeight::Regular);
        assert_eq!(lines, vec!["short".to_string(), word, "tail".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_lines() {
        assert!(wrap_greedy("", MAX, 44.0, FontWeight::Regular).is_empty());
        assert!(wrap_greedy("   ", MAX, 44.0, FontWeight::Regular).is_empty());
    }
}
