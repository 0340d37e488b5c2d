//! Chunks: candidate fragments of article text.
//!
//! The chunk walk reduces the cleaned body to a linear sequence of
//! [`Chunk`]s, one per text node and one per heading or anchor. Headings and
//! anchors are converted whole; descending into their children would
//! fragment their text and make the classifier's job noisier. Each chunk
//! remembers its innermost element, its enclosing block, the classes along
//! that path, and which special containers were open when it was emitted.

use bitflags::bitflags;
use dom_query::{NodeId, NodeRef};

use crate::cleaner;
use crate::text::{Text, TextBuilder};

bitflags! {
    /// Special containers remembered while descending into their children.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Ancestors: u32 {
        const ARTICLE    = 1 << 0;
        const ASIDE      = 1 << 1;
        const BLOCKQUOTE = 1 << 2;
        const LIST       = 1 << 3;
    }
}

/// Tags that open a new output block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// A classified text fragment and the DOM context it was found in.
///
/// Chunks are produced in document order and never mutated after the
/// sequence is linked. DOM nodes are referenced by arena id only, so a chunk
/// stays valid for as long as the owning article keeps its tree.
#[derive(Debug, Clone)]
pub struct Chunk {
    text: Text,
    base: NodeId,
    base_tag: String,
    block: NodeId,
    block_chain: Vec<NodeId>,
    classes: Vec<String>,
    ancestors: Ancestors,
    prev: Option<usize>,
    next: Option<usize>,
}

impl Chunk {
    /// The chunk's text with word and sentence counts.
    #[must_use]
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Arena id of the originating element: the innermost enclosing element
    /// for text-node chunks, the heading or anchor itself otherwise.
    #[must_use]
    pub fn base(&self) -> NodeId {
        self.base
    }

    /// Lowercased tag name of the base element.
    #[must_use]
    pub fn base_tag(&self) -> &str {
        &self.base_tag
    }

    /// Arena id of the nearest block-level ancestor (the base itself when it
    /// is block-level, `body` as the terminal fallback).
    #[must_use]
    pub fn block(&self) -> NodeId {
        self.block
    }

    /// Lowercased class tokens of the base element and its ancestors up to
    /// and including the block.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Containers that enclosed the base when the chunk was emitted.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors {
        self.ancestors
    }

    /// Index of the preceding chunk in the owning article, if any.
    #[must_use]
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Index of the following chunk in the owning article, if any.
    #[must_use]
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// The block id followed by its element ancestors up to the root.
    /// Cached at build time so aggregate passes never walk the DOM.
    pub(crate) fn block_chain(&self) -> &[NodeId] {
        &self.block_chain
    }

    pub(crate) fn set_prev(&mut self, index: usize) {
        self.prev = Some(index);
    }

    pub(crate) fn set_next(&mut self, index: usize) {
        self.next = Some(index);
    }

    /// Chunk for a non-whitespace text node; base is the parent element.
    fn from_text(node: &NodeRef, ancestors: Ancestors) -> Option<Self> {
        let content = node.text();
        if content.trim().is_empty() {
            return None;
        }
        let base = node.parent().filter(|p| p.is_element())?;
        let mut builder = TextBuilder::new();
        builder.push_str(&content);
        if builder.is_empty() {
            return None;
        }
        Some(Self::assemble(builder.finish(), &base, ancestors))
    }

    /// Chunk for a heading or anchor, taken as one atomic piece of text.
    fn from_element(node: &NodeRef, ancestors: Ancestors) -> Option<Self> {
        let mut builder = TextBuilder::new();
        builder.push_str(&node.text());
        if builder.is_empty() {
            return None;
        }
        Some(Self::assemble(builder.finish(), node, ancestors))
    }

    fn assemble(text: Text, base: &NodeRef, ancestors: Ancestors) -> Self {
        let base_tag = base
            .node_name()
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_default();

        let mut block = base.clone();
        loop {
            let tag = block.node_name().unwrap_or_default();
            if is_block_tag(&tag.to_ascii_lowercase()) {
                break;
            }
            match block.parent().filter(|p| p.is_element()) {
                Some(parent) => block = parent,
                None => break,
            }
        }

        let mut classes = Vec::new();
        let mut cursor = base.clone();
        loop {
            if let Some(attr) = cursor.attr("class") {
                for token in attr.split_whitespace() {
                    classes.push(token.to_lowercase());
                }
            }
            if cursor.id == block.id {
                break;
            }
            match cursor.parent().filter(|p| p.is_element()) {
                Some(parent) => cursor = parent,
                None => break,
            }
        }

        let mut block_chain = vec![block.id];
        let mut cursor = block.clone();
        while let Some(parent) = cursor.parent() {
            if !parent.is_element() {
                break;
            }
            block_chain.push(parent.id);
            cursor = parent;
        }

        Self {
            text,
            base: base.id,
            base_tag,
            block: block.id,
            block_chain,
            classes,
            ancestors,
            prev: None,
            next: None,
        }
    }
}

/// Walk the cleaned body and emit chunks in document order.
///
/// Elements whose attributes match the blacklists are skipped wholesale in
/// case an offender survived cleaning. Neighbour linking is left to the
/// caller.
pub(crate) fn collect_chunks(body: &NodeRef) -> Vec<Chunk> {
    let mut walker = Walker { chunks: Vec::new(), ancestors: Ancestors::empty() };
    walker.walk(body);
    walker.chunks
}

struct Walker {
    chunks: Vec<Chunk>,
    ancestors: Ancestors,
}

impl Walker {
    fn walk(&mut self, node: &NodeRef) {
        if node.is_element() {
            if cleaner::has_blacklisted_attrs(node) {
                return;
            }
            let tag = node
                .node_name()
                .map(|t| t.to_ascii_lowercase())
                .unwrap_or_default();
            if matches!(tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "a") {
                if let Some(chunk) = Chunk::from_element(node, self.ancestors) {
                    self.chunks.push(chunk);
                }
                return;
            }
            // Set each container bit only if it is not already set, and on
            // the way back up clear only what was set here; an inner
            // <article> must not clear the bit its outer <article> owns.
            let added = container_flag(&tag).difference(self.ancestors);
            self.ancestors.insert(added);
            for child in node.children() {
                self.walk(&child);
            }
            self.ancestors.remove(added);
        } else if node.is_text() {
            if let Some(chunk) = Chunk::from_text(node, self.ancestors) {
                self.chunks.push(chunk);
            }
        }
    }
}

fn container_flag(tag: &str) -> Ancestors {
    match tag {
        "article" => Ancestors::ARTICLE,
        "aside" => Ancestors::ASIDE,
        "blockquote" => Ancestors::BLOCKQUOTE,
        "ul" | "ol" => Ancestors::LIST,
        _ => Ancestors::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn chunks_for(html: &str) -> Vec<Chunk> {
        let doc = Document::from(html);
        let body = doc.select("body").nodes().first().cloned().unwrap();
        cleaner::clean_body(&body);
        collect_chunks(&body)
    }

    #[test]
    fn heading_then_paragraph() {
        let chunks = chunks_for("<body><h1>News</h1><p>Hello world.</p></body>");
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].base_tag(), "h1");
        assert_eq!(chunks[0].text().words(), 1);
        assert_eq!(chunks[0].text().sentences(), 0);

        assert_eq!(chunks[1].base_tag(), "p");
        assert_eq!(chunks[1].text().words(), 2);
        assert_eq!(chunks[1].text().sentences(), 1);

        assert_ne!(chunks[0].block(), chunks[1].block());
    }

    #[test]
    fn headings_and_anchors_are_atomic() {
        let chunks =
            chunks_for("<body><h2>Breaking <em>news</em> today</h2><a href=\"/x\">read <b>more</b></a></body>");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text().raw(), "Breaking news today");
        assert_eq!(chunks[1].base_tag(), "a");
        assert_eq!(chunks[1].text().words(), 2);
    }

    #[test]
    fn no_chunk_is_empty() {
        let chunks = chunks_for(
            "<body>\n   <div>\n</div><p>real text.</p>\n<a href=\"/\"> </a></body>",
        );
        assert_eq!(chunks.len(), 1);
        for chunk in &chunks {
            assert!(chunk.text().words() >= 1);
        }
    }

    #[test]
    fn ancestor_bits_follow_containers() {
        let chunks = chunks_for(
            "<body><article><p>in article</p></article>\
             <aside><p>misc</p></aside>\
             <blockquote><p>quoted</p></blockquote>\
             <ul><li>item</li></ul>\
             <p>outside</p></body>",
        );
        assert_eq!(chunks.len(), 5);
        assert!(chunks[0].ancestors().contains(Ancestors::ARTICLE));
        assert!(chunks[1].ancestors().contains(Ancestors::ASIDE));
        assert!(chunks[2].ancestors().contains(Ancestors::BLOCKQUOTE));
        assert!(chunks[3].ancestors().contains(Ancestors::LIST));
        assert!(chunks[4].ancestors().is_empty());
    }

    #[test]
    fn nested_article_keeps_outer_bit() {
        let chunks = chunks_for(
            "<body><article><article><p>deep</p></article><p>shallow</p></article></body>",
        );
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].ancestors().contains(Ancestors::ARTICLE));
        // Leaving the inner article must not clear the outer article's bit.
        assert!(chunks[1].ancestors().contains(Ancestors::ARTICLE));
    }

    #[test]
    fn walker_skips_blacklisted_subtrees_without_cleaner() {
        let doc = Document::from(
            "<body><div class=\"related\"><p>teaser</p></div><p>body text.</p></body>",
        );
        let body = doc.select("body").nodes().first().cloned().unwrap();
        let chunks = collect_chunks(&body);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text().raw(), "body text.");
    }

    #[test]
    fn block_is_nearest_block_ancestor() {
        let chunks = chunks_for(
            "<body><p id=\"p\">lead <em>emphasis</em></p><ul><li>entry</li></ul></body>",
        );
        // "lead " and "emphasis" share the paragraph block.
        assert_eq!(chunks[0].block(), chunks[1].block());
        assert_eq!(chunks[0].base_tag(), "p");
        assert_eq!(chunks[1].base_tag(), "em");
        // The list item is its own block.
        assert_eq!(chunks[2].base_tag(), "li");
        assert_eq!(chunks[2].block(), chunks[2].base());
    }

    #[test]
    fn classes_collect_from_base_to_block() {
        let chunks = chunks_for(
            "<body><p class=\"Story-Body lead\"><span class=\"Inline\">text</span></p></body>",
        );
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].classes(), ["inline", "story-body", "lead"]);
    }

    #[test]
    fn anchors_inside_paragraphs_use_the_paragraph_block() {
        let chunks = chunks_for(
            "<body><p>see <a href=\"/ref\">the report</a> for details</p></body>",
        );
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].base_tag(), "a");
        assert_eq!(chunks[0].block(), chunks[1].block());
        assert_eq!(chunks[1].block(), chunks[2].block());
    }
}
