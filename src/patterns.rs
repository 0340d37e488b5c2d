//! Compiled regex patterns for boilerplate detection.
//!
//! All patterns are compiled once at first use via `LazyLock`. The name
//! blacklist is matched as a case-insensitive substring against `id`,
//! `class` and `itemprop` attribute values, both while cleaning the tree
//! and again while collecting chunks.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Build a case-insensitive regex matching any of the given words as a
/// substring. Words may themselves carry regex syntax (`story[-_]?bar`).
#[must_use]
pub fn regex_from_words(words: &[&str]) -> Regex {
    Regex::new(&format!("(?i){}", words.join("|"))).expect("word-set regex")
}

/// Attribute words that mark page furniture rather than article text.
pub static NAME_BLACKLIST: LazyLock<Regex> = LazyLock::new(|| {
    regex_from_words(&[
        "breadcrumb",
        "byline",
        "caption",
        "comment",
        "community",
        "credit",
        "description",
        "email",
        "foot",
        "gallery",
        "hide",
        "infotext",
        "photo",
        "related",
        "shares",
        "social",
        "story[-_]?bar",
        "story[-_]?feature",
    ])
});

/// Inline style that hides an element.
pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display:\s*none").expect("DISPLAY_NONE regex"));
