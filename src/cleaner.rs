//! Structural cleanup of the document body.
//!
//! Removes the element classes that never carry article text: scripts,
//! forms, media wrappers, navigation, deeply nested layout tables, and
//! anything whose attributes name it as page furniture or hide it outright.
//! The tree is mutated in place; the chunk walk afterwards only sees
//! survivors.

use dom_query::{NodeRef, Selection};

use crate::patterns;

/// Tags whose subtrees are always removed from the body.
const STRUCTURAL_BLACKLIST: &[&str] = &[
    "address", "audio", "button", "canvas", "caption", "fieldset", "figcaption", "figure",
    "footer", "form", "frame", "iframe", "map", "menu", "nav", "noscript", "object", "option",
    "output", "script", "select", "style", "svg", "textarea", "video",
];

/// Tables nested deeper than this are decoration, not layout.
const MAX_TABLE_DEPTH: usize = 5;

/// Remove unwanted element subtrees from the body, in place.
///
/// Running this twice leaves the tree unchanged the second time.
pub fn clean_body(body: &NodeRef) {
    clean_children(body, 0);
}

fn clean_children(node: &NodeRef, depth: usize) {
    // children() materializes the child list, so removing a node below
    // cannot skip its next sibling.
    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        if should_remove(&child, depth) {
            Selection::from(child).remove();
        } else {
            clean_children(&child, depth + 1);
        }
    }
}

fn should_remove(element: &NodeRef, depth: usize) -> bool {
    let Some(tag) = element.node_name() else {
        return false;
    };
    if STRUCTURAL_BLACKLIST.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
        return true;
    }
    // Shallow tables lay out the page; only deep ones get dropped.
    if tag.eq_ignore_ascii_case("table") && depth > MAX_TABLE_DEPTH {
        return true;
    }
    has_blacklisted_attrs(element)
}

/// True when the element's attributes name it as page furniture
/// (`id`/`class`/`itemprop` blacklist) or hide it (`display: none`).
///
/// Shared with the chunk walk, which skips such subtrees in case one
/// appears after cleaning.
pub(crate) fn has_blacklisted_attrs(element: &NodeRef) -> bool {
    for key in ["id", "class", "itemprop"] {
        if let Some(value) = element.attr(key) {
            if patterns::NAME_BLACKLIST.is_match(&value) {
                return true;
            }
        }
    }
    if let Some(style) = element.attr("style") {
        if patterns::DISPLAY_NONE.is_match(&style) {
            return true;
        }
    }
    false
}
