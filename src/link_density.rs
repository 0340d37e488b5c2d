//! Per-node accounting of text inside and outside anchors.
//!
//! A single post-order walk over the cleaned body records, for every node,
//! how many letters of its subtree sit inside `<a>` descendants and how many
//! sit outside. The ratio is the link density consumed by the feature
//! extractor: navigation blocks approach 1.0, article paragraphs stay near
//! zero.

use std::collections::HashMap;

use dom_query::{NodeId, NodeRef};

/// Cumulative letter counts per DOM node, keyed by arena id.
#[derive(Debug, Default)]
pub struct LinkDensityMap {
    link: HashMap<NodeId, usize>,
    nonlink: HashMap<NodeId, usize>,
}

impl LinkDensityMap {
    /// Walk the subtree rooted at `node` and record counts for every node
    /// in it.
    #[must_use]
    pub fn build(node: &NodeRef) -> Self {
        let mut map = Self::default();
        map.count(node, false);
        map
    }

    /// Letters inside `<a>` descendants of the node (the node itself
    /// included when it is an anchor).
    #[must_use]
    pub fn link_letters(&self, id: NodeId) -> usize {
        self.link.get(&id).copied().unwrap_or(0)
    }

    /// Letters outside any anchor.
    #[must_use]
    pub fn nonlink_letters(&self, id: NodeId) -> usize {
        self.nonlink.get(&id).copied().unwrap_or(0)
    }

    /// `link / (link + nonlink)`, or 0 for letterless nodes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self, id: NodeId) -> f32 {
        let link = self.link_letters(id);
        let total = link + self.nonlink_letters(id);
        if total == 0 {
            return 0.0;
        }
        link as f32 / total as f32
    }

    fn count(&mut self, node: &NodeRef, inside_link: bool) -> (usize, usize) {
        let inside_link = inside_link
            || (node.is_element()
                && node.node_name().is_some_and(|t| t.eq_ignore_ascii_case("a")));

        let mut link = 0;
        let mut nonlink = 0;
        for child in node.children() {
            let (child_link, child_nonlink) = self.count(&child, inside_link);
            link += child_link;
            nonlink += child_nonlink;
        }
        if node.is_text() {
            let letters = node.text().chars().filter(|c| c.is_alphabetic()).count();
            if inside_link {
                link += letters;
            } else {
                nonlink += letters;
            }
        }
        self.link.insert(node.id, link);
        self.nonlink.insert(node.id, nonlink);
        (link, nonlink)
    }
}
