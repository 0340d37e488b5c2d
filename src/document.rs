//! Parsed HTML documents.
//!
//! A [`Document`] wraps the DOM produced by `dom_query`, verifies that the
//! page has the `<html>`, `<head>` and `<body>` elements every later pass
//! relies on, and extracts the `<title>` text. [`crate::Article`] and
//! [`crate::Website`] build on top of it.

use dom_query::NodeRef;

use crate::encoding;
use crate::error::{Error, Result};
use crate::text::{Text, TextBuilder};

/// A parsed HTML document with its title text.
pub struct Document {
    dom: dom_query::Document,
    title: Text,
}

impl Document {
    /// Parse an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] when the parsed tree lacks an
    /// `<html>`, `<head>` or `<body>` element.
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = dom_query::Document::from(html);
        let title = {
            let html_node = dom
                .select("html")
                .nodes()
                .first()
                .cloned()
                .ok_or(Error::MalformedDocument)?;

            // head and body sit directly under html once the parser has
            // normalized the tree; a shallow scan is all the search we need.
            let mut head = None;
            let mut body = None;
            for child in html_node.children() {
                if !child.is_element() {
                    continue;
                }
                match child.node_name().as_deref() {
                    Some("head") => head = Some(child),
                    Some("body") => body = Some(child),
                    _ => {}
                }
            }
            let head = head.ok_or(Error::MalformedDocument)?;
            if body.is_none() {
                return Err(Error::MalformedDocument);
            }

            let mut builder = TextBuilder::new();
            if let Some(title_node) = find_element(&head, "title") {
                builder.push_str(&title_node.text());
            }
            builder.finish()
        };
        Ok(Self { dom, title })
    }

    /// Parse HTML bytes, transcoding to UTF-8 first (see [`crate::encoding`]).
    ///
    /// # Errors
    ///
    /// Same conditions as [`Document::from_html`].
    pub fn from_bytes(html: &[u8]) -> Result<Self> {
        Self::from_html(&encoding::transcode_to_utf8(html))
    }

    /// The `<title>` text, whitespace-normalized.
    #[must_use]
    pub fn title(&self) -> &Text {
        &self.title
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body(&self) -> Option<NodeRef<'_>> {
        self.dom.select("body").nodes().first().cloned()
    }

    /// The `<head>` element.
    #[must_use]
    pub fn head(&self) -> Option<NodeRef<'_>> {
        self.dom.select("head").nodes().first().cloned()
    }

    /// Serialize the current state of the DOM.
    #[must_use]
    pub fn html(&self) -> String {
        self.dom.html().to_string()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("title", &self.title).finish_non_exhaustive()
    }
}

/// Depth-first search for the first element with the given tag name.
pub(crate) fn find_element<'a>(node: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        if child.node_name().as_deref() == Some(tag) {
            return Some(child);
        }
        if let Some(found) = find_element(&child, tag) {
            return Some(found);
        }
    }
    None
}
