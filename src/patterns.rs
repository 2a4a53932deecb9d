//! Compiled regex patterns for content scoring and Markdown cleanup.
//!
//! All patterns are compiled once on first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Classification
// =============================================================================

/// Class/id names of regions that are almost never main content.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs?|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote|cookie",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Class/id names that rescue an otherwise unlikely region.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|shadow").expect("MAYBE_CANDIDATE regex")
});

/// Matches class/id names indicating navigation elements.
///
/// "nav" only matches as a whole token or at a token edge so layout
/// containers like "in-page-nav-container" are left alone.
pub static NAVIGATION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^nav$|^nav[-_]|[-_]nav$|navbar|navigation|top[-_]?nav|main[-_]?menu|site[-_]?nav)")
        .expect("NAVIGATION_CLASS regex")
});

/// Matches a single class/id token naming an advertisement slot.
pub static ADVERTISEMENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ad|ads|advert|advertisement|sponsor|sponsored|promo)$")
        .expect("ADVERTISEMENT_CLASS regex")
});

// =============================================================================
// Class Weights
// =============================================================================

pub static POSITIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story")
        .expect("POSITIVE_CLASS regex")
});

pub static NEGATIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footer|footnote|gdpr|masthead|media|meta|nav|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE_CLASS regex")
});

// =============================================================================
// Document Structure
// =============================================================================

/// Detects an explicit `<body>` tag in raw markup.
pub static BODY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body[\s>/]").expect("BODY_TAG regex"));

// =============================================================================
// Markdown Cleanup
// =============================================================================

/// A Markdown link whose target has a non-empty path followed by a fragment.
///
/// The label may hold one level of brackets (a linked image). Path and
/// fragment may hold balanced `(...)` groups but no bare parentheses or
/// whitespace, so a match never runs past the end of its own link target.
pub static LINK_WITH_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[((?:[^\[\]]|\[[^\[\]]*\])+)\]\(((?:[^#()\s]|\([^()\s]*\))+)#((?:[^()\s]|\([^()\s]*\))*)\)",
    )
    .expect("LINK_WITH_FRAGMENT regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_matches_boilerplate_names() {
        for name in ["sidebar", "site-footer", "comment-list", "main-menu", "cookie-banner"] {
            assert!(UNLIKELY_CANDIDATES.is_match(name), "{name}");
        }
        assert!(!UNLIKELY_CANDIDATES.is_match("story-body"));
    }

    #[test]
    fn maybe_candidate_rescues_content_wrappers() {
        assert!(UNLIKELY_CANDIDATES.is_match("header-content"));
        assert!(MAYBE_CANDIDATE.is_match("header-content"));
    }

    #[test]
    fn navigation_class_respects_token_edges() {
        assert!(NAVIGATION_CLASS.is_match("nav"));
        assert!(NAVIGATION_CLASS.is_match("main-nav"));
        assert!(NAVIGATION_CLASS.is_match("navbar"));
        assert!(!NAVIGATION_CLASS.is_match("usa-in-page-nav-container"));
    }

    #[test]
    fn advertisement_class_is_whole_token() {
        assert!(ADVERTISEMENT_CLASS.is_match("ad"));
        assert!(ADVERTISEMENT_CLASS.is_match("Sponsored"));
        assert!(!ADVERTISEMENT_CLASS.is_match("header"));
    }

    #[test]
    fn body_tag_detection() {
        assert!(BODY_TAG.is_match("<html><BODY class=x>"));
        assert!(BODY_TAG.is_match("<body>"));
        assert!(!BODY_TAG.is_match("<bodyguard>"));
        assert!(!BODY_TAG.is_match("<p>no body</p>"));
    }

    #[test]
    fn link_fragment_requires_path() {
        assert!(LINK_WITH_FRAGMENT.is_match("[a](https://x/y#z)"));
        assert!(!LINK_WITH_FRAGMENT.is_match("[a](#z)"));
        assert!(!LINK_WITH_FRAGMENT.is_match("[a](https://x/y)"));
    }

    #[test]
    fn link_fragment_allows_parens_and_linked_images() {
        assert!(LINK_WITH_FRAGMENT.is_match("[Rust](https://en.wikipedia.org/wiki/Rust_(lang)#History)"));
        assert!(LINK_WITH_FRAGMENT.is_match("[![A](https://x/a.png)](https://x/p#sec)"));
        assert!(!LINK_WITH_FRAGMENT.is_match("[a](https://x/y) and # then (b)"));
    }
}
