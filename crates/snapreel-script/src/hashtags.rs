//! Hashtag dictionary lookup.

/// Maximum number of hashtags returned per lookup.
pub const MAX_HASHTAGS: usize = 6;

/// Niche keyword → tag set. First substring match of the normalized niche
/// wins, so broader keywords must not shadow narrower ones.
const NICHE_TAGS: [(&str, [&str; 5]); 4] = [
    (
        "business",
        [
            "#entrepreneurtips",
            "#sidehustleideas",
            "#digitalproducts",
            "#smallbizowner",
            "#passiveincome",
        ],
    ),
    (
        "fitness",
        [
            "#fitcheck",
            "#wellnesstips",
            "#workoutroutine",
            "#fitnessmotivation",
            "#healthylifestyle",
        ],
    ),
    (
        "beauty",
        [
            "#skincareroutine",
            "#beautyhacks",
            "#glowupchallenge",
            "#makeuptutorial",
            "#selfcareclub",
        ],
    ),
    (
        "tech",
        [
            "#techtiktok",
            "#aiforcreators",
            "#productivityhack",
            "#techtools",
            "#automationtips",
        ],
    ),
];

/// Tags appended to every lookup, and the whole result when nothing matches.
const DEFAULT_TAGS: [&str; 5] = ["#fyp", "#viral", "#tiktokmade", "#contentcreator", "#dailyinspo"];

/// Look up hashtags for a niche.
///
/// The niche is trimmed and lowercased, then matched by substring against the
/// dictionary keys. The matched set is followed by the default set,
/// deduplicated in order, and capped at [`MAX_HASHTAGS`] entries.
pub fn lookup_hashtags(niche: &str) -> Vec<String> {
    let normalized = niche.trim().to_lowercase();

    let matched: &[&str] = NICHE_TAGS
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, tags)| tags.as_slice())
        .unwrap_or(&DEFAULT_TAGS);

    let mut result: Vec<String> = Vec::with_capacity(MAX_HASHTAGS);
    for tag in matched.iter().chain(DEFAULT_TAGS.iter()) {
        if result.len() == MAX_HASHTAGS {
            break;
        }
        if !result.iter().any(|seen| seen == tag) {
            result.push(tag.to_string());
        }
    }

    result
}
