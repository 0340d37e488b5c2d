//! Outbound link enumeration for feed-style pages.
//!
//! A [`Website`] is the link-mode counterpart of [`crate::Article`]: instead
//! of chunking the body it records every anchor, plus any RSS feeds the head
//! advertises. Relative hrefs can be resolved against the page URL once it
//! is known.

use dom_query::NodeRef;
use url::Url;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::text::{Text, TextBuilder};

/// A single outbound link.
#[derive(Debug, Clone)]
pub struct Link {
    href: String,
    text: Text,
}

impl Link {
    /// The link target, as written or as resolved.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The anchor text (empty for image-only or icon links).
    #[must_use]
    pub fn text(&self) -> &Text {
        &self.text
    }

    fn from_anchor(node: &NodeRef) -> Option<Self> {
        let href = node.attr("href")?;
        if href.trim().is_empty() {
            return None;
        }
        let mut builder = TextBuilder::new();
        builder.push_str(&node.text());
        Some(Self { href: href.trim().to_string(), text: builder.finish() })
    }

    fn resolve(&mut self, base: &Url) {
        if let Ok(resolved) = base.join(&self.href) {
            self.href = resolved.to_string();
        }
    }
}

/// A parsed page viewed as a collection of links.
#[derive(Debug)]
pub struct Website {
    document: Document,
    links: Vec<Link>,
    feeds: Vec<Link>,
}

impl Website {
    /// Parse an HTML string and collect its links and feeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] when the page lacks `<html>`,
    /// `<head>` or `<body>`.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_document(Document::from_html(html)?)
    }

    /// Parse HTML bytes (transcoded per [`crate::encoding`]).
    ///
    /// # Errors
    ///
    /// Same conditions as [`Website::from_html`].
    pub fn from_bytes(html: &[u8]) -> Result<Self> {
        Self::from_document(Document::from_bytes(html)?)
    }

    fn from_document(document: Document) -> Result<Self> {
        let (links, feeds) = {
            let body = document.body().ok_or(Error::MalformedDocument)?;
            let head = document.head().ok_or(Error::MalformedDocument)?;

            let mut links = Vec::new();
            collect_anchors(&body, &mut links);

            let mut feeds = Vec::new();
            collect_feeds(&head, &mut feeds);
            (links, feeds)
        };
        Ok(Self { document, links, feeds })
    }

    /// The document title.
    #[must_use]
    pub fn title(&self) -> &Text {
        self.document.title()
    }

    /// Every href-carrying anchor in the body, in document order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// RSS feeds advertised in the head.
    #[must_use]
    pub fn feeds(&self) -> &[Link] {
        &self.feeds
    }

    /// Resolve relative links and feeds against an absolute base URL.
    ///
    /// Does nothing when `base` is not an absolute URL, so callers can pass
    /// their input location unconditionally.
    pub fn resolve_base(&mut self, base: &str) {
        let Ok(base) = Url::parse(base) else { return };
        for link in &mut self.links {
            link.resolve(&base);
        }
        for feed in &mut self.feeds {
            feed.resolve(&base);
        }
    }
}

/// Collect anchors depth-first. Anchors do not nest, so recursion stops at
/// each one found.
fn collect_anchors(node: &NodeRef, links: &mut Vec<Link>) {
    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        if child.node_name().is_some_and(|t| t.eq_ignore_ascii_case("a")) {
            if let Some(link) = Link::from_anchor(&child) {
                links.push(link);
            }
            continue;
        }
        collect_anchors(&child, links);
    }
}

/// Collect `<link rel="alternate" type="application/rss+xml">` feeds.
/// The parser keeps link elements as direct children of head.
fn collect_feeds(head: &NodeRef, feeds: &mut Vec<Link>) {
    for child in head.children() {
        if !child.is_element() || child.node_name().as_deref() != Some("link") {
            continue;
        }
        let rel_alternate = child.attr("rel").is_some_and(|v| v.trim() == "alternate");
        let type_rss = child
            .attr("type")
            .is_some_and(|v| v.trim() == "application/rss+xml");
        let href = child.attr("href");
        if rel_alternate && type_rss {
            if let Some(href) = href {
                if !href.trim().is_empty() {
                    feeds.push(Link {
                        href: href.trim().to_string(),
                        text: Text::default(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_anchors_in_document_order() {
        let site = Website::from_html(
            "<html><body>\
             <a href=\"/first\">First</a>\
             <div><a href=\"/second\">Second</a></div>\
             <a name=\"no-href\">skipped</a>\
             </body></html>",
        )
        .unwrap();
        let hrefs: Vec<_> = site.links().iter().map(Link::href).collect();
        assert_eq!(hrefs, ["/first", "/second"]);
        assert_eq!(site.links()[0].text().raw(), "First");
    }

    #[test]
    fn collects_advertised_feeds() {
        let site = Website::from_html(
            "<html><head>\
             <link rel=\"alternate\" type=\"application/rss+xml\" href=\"/feed.xml\">\
             <link rel=\"stylesheet\" href=\"/style.css\">\
             </head><body></body></html>",
        )
        .unwrap();
        assert_eq!(site.feeds().len(), 1);
        assert_eq!(site.feeds()[0].href(), "/feed.xml");
    }

    #[test]
    fn resolve_base_absolutizes_relative_links() {
        let mut site = Website::from_html(
            "<html><head>\
             <link rel=\"alternate\" type=\"application/rss+xml\" href=\"feed.xml\">\
             </head><body>\
             <a href=\"/world/story\">story</a>\
             <a href=\"https://other.example/x\">absolute</a>\
             </body></html>",
        )
        .unwrap();
        site.resolve_base("https://news.example/section/page.html");
        assert_eq!(site.links()[0].href(), "https://news.example/world/story");
        assert_eq!(site.links()[1].href(), "https://other.example/x");
        assert_eq!(site.feeds()[0].href(), "https://news.example/section/feed.xml");
    }

    #[test]
    fn resolve_base_ignores_non_urls() {
        let mut site =
            Website::from_html("<html><body><a href=\"/x\">x</a></body></html>").unwrap();
        site.resolve_base("some/local/file.html");
        assert_eq!(site.links()[0].href(), "/x");
    }
}
