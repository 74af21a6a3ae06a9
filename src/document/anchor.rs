use once_cell::sync::Lazy;
use regex::Regex;

/// ATX heading line: 1-6 leading hashes, required whitespace, then the
/// display text with optional trailing closing hashes
pub static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})\s+(.*?)\s*#*\s*$").unwrap()
});

/// Markdown link at the start of a TOC entry: `[text](target)`
pub static TOC_LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?P<text>[^\]]*)\]\((?P<target>[^)]*)\)").unwrap()
});

/// Bulleted list item with its indentation captured
pub static BULLET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)[-*+]\s+(?P<rest>.*?)\s*$").unwrap()
});

/// Derives the anchor slug for a heading's display text.
///
/// Rule (matching the GitHub renderer): lowercase the text, drop every
/// character that is not alphanumeric, space, hyphen or underscore (emoji
/// and punctuation are removed), then replace spaces with hyphens.
/// Consecutive hyphens are kept as produced, not collapsed.
///
/// The derivation is idempotent: slugging an already-derived slug yields
/// the same string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            // Lowercasing can expand one char into several (e.g. `İ`
            // becomes `i` plus a combining mark); the expansion goes
            // through the same keep-rule so derivation stays idempotent
            for lower in ch.to_lowercase() {
                if lower.is_alphanumeric() || lower == '_' || lower == '-' {
                    slug.push(lower);
                }
            }
        } else if ch == ' ' {
            slug.push('-');
        }
        // Everything else (punctuation, emoji, tabs) is dropped
    }
    slug
}

/// Strips a leading `#` fragment marker from a link target, yielding the
/// bare anchor string. Targets without a fragment are returned unchanged.
pub fn anchor_of_target(target: &str) -> &str {
    match target.find('#') {
        Some(pos) => &target[pos + 1..],
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Prerequisites"), "prerequisites");
        assert_eq!(
            slugify("Select inference device for LLM"),
            "select-inference-device-for-llm"
        );
    }

    #[test]
    fn test_slugify_strips_punctuation_and_emoji() {
        assert_eq!(slugify("Create tools!"), "create-tools");
        assert_eq!(slugify("Run the model 🚀"), "run-the-model-");
        assert_eq!(slugify("What's next?"), "whats-next");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for text in ["Select inference device for LLM", "A  B", "Run 🚀", "x_y-z", "İnstall"] {
            let once = slugify(text);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_slugify_unicode_lowercase_expansion() {
        // `İ` lowercases to `i` plus a combining dot; the mark must not
        // survive into the slug
        assert_eq!(slugify("İnstall"), "install");
    }

    #[test]
    fn test_slugify_keeps_consecutive_hyphens() {
        // Two spaces become two hyphens, matching the GitHub renderer
        assert_eq!(slugify("A  B"), "a--b");
    }

    #[test]
    fn test_anchor_of_target() {
        assert_eq!(anchor_of_target("#prerequisites"), "prerequisites");
        assert_eq!(anchor_of_target("notebook.ipynb#setup"), "setup");
        assert_eq!(anchor_of_target("plain-anchor"), "plain-anchor");
    }
}
