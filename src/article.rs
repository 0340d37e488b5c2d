//! Articles: a parsed document reduced to scored text chunks.
//!
//! [`Article`] runs the whole preparation pipeline at construction time:
//! clean the body, count link text per node, collect chunks, link
//! neighbours. The aggregate statistics consumed by the feature extractor
//! are computed on demand from the finished chunk sequence.

use std::collections::HashMap;

use dom_query::NodeId;

use crate::chunk::{self, Chunk};
use crate::cleaner;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::link_density::LinkDensityMap;
use crate::text::{Text, TextStat};

/// How many block ancestors take part in cluster statistics.
const MAX_ANCESTORS: usize = 3;

/// A document prepared for chunk classification.
///
/// Owns the DOM, the chunk sequence derived from it, and the link-density
/// maps keyed by node id; all of them live and die together.
#[derive(Debug)]
pub struct Article {
    document: Document,
    chunks: Vec<Chunk>,
    density: LinkDensityMap,
}

impl Article {
    /// Parse an HTML string and run the preparation pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] when the page lacks `<html>`,
    /// `<head>` or `<body>`.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_document(Document::from_html(html)?)
    }

    /// Parse HTML bytes (transcoded per [`crate::encoding`]) and run the
    /// preparation pipeline.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Article::from_html`].
    pub fn from_bytes(html: &[u8]) -> Result<Self> {
        Self::from_document(Document::from_bytes(html)?)
    }

    fn from_document(document: Document) -> Result<Self> {
        let (density, mut chunks) = {
            let body = document.body().ok_or(Error::MalformedDocument)?;
            cleaner::clean_body(&body);
            let density = LinkDensityMap::build(&body);
            (density, chunk::collect_chunks(&body))
        };

        let count = chunks.len();
        for (index, chunk) in chunks.iter_mut().enumerate() {
            if index > 0 {
                chunk.set_prev(index - 1);
            }
            if index + 1 < count {
                chunk.set_next(index + 1);
            }
        }

        Ok(Self { document, chunks, density })
    }

    /// The document title.
    #[must_use]
    pub fn title(&self) -> &Text {
        self.document.title()
    }

    /// All chunks in document order.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Link density of the given node (see [`LinkDensityMap::density`]).
    #[must_use]
    pub fn link_density(&self, id: NodeId) -> f32 {
        self.density.density(id)
    }

    /// Word/sentence totals over every chunk in the document.
    #[must_use]
    pub fn totals(&self) -> TextStat {
        let mut total = TextStat::default();
        for chunk in &self.chunks {
            total.add(chunk.text());
        }
        total
    }

    /// Text statistics per class token, over all chunks carrying the class.
    #[must_use]
    pub fn class_stats(&self) -> HashMap<String, TextStat> {
        let mut stats: HashMap<String, TextStat> = HashMap::new();
        for chunk in &self.chunks {
            for class in chunk.classes() {
                stats.entry(class.clone()).or_default().add(chunk.text());
            }
        }
        stats
    }

    /// The cluster statistic for every chunk, parallel to [`Article::chunks`].
    ///
    /// Chunks are first grouped under their block and up to two further
    /// ancestors; each chunk is then attributed to the most populous group
    /// on its ancestor path, preferring the deeper group on ties.
    #[must_use]
    pub fn cluster_stats(&self) -> Vec<TextStat> {
        let mut ancestor_stats: HashMap<NodeId, TextStat> = HashMap::new();
        for chunk in &self.chunks {
            for id in chunk.block_chain().iter().take(MAX_ANCESTORS) {
                ancestor_stats.entry(*id).or_default().add(chunk.text());
            }
        }

        self.chunks
            .iter()
            .map(|chunk| {
                let mut chain = chunk.block_chain().iter();
                let Some(mut stat) = chain.next().and_then(|id| ancestor_stats.get(id)) else {
                    return TextStat::default();
                };
                for id in chain {
                    match ancestor_stats.get(id) {
                        Some(parent) if parent.count > stat.count => stat = parent,
                        Some(_) => {}
                        None => break,
                    }
                }
                *stat
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Ancestors;

    #[test]
    fn pipeline_produces_linked_chunks() {
        let article = Article::from_html(
            "<html><head><title>t</title></head><body>\
             <h1>News</h1><p>First sentence here.</p><p>Second one.</p>\
             </body></html>",
        )
        .unwrap();
        let chunks = article.chunks();
        assert_eq!(chunks.len(), 3);

        assert_eq!(chunks[0].prev(), None);
        assert_eq!(chunks[chunks.len() - 1].next(), None);
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                assert_eq!(chunk.prev(), Some(index - 1));
            }
            if index + 1 < chunks.len() {
                assert_eq!(chunk.next(), Some(index + 1));
            }
        }
    }

    #[test]
    fn cleaner_runs_before_chunking() {
        let article = Article::from_html(
            "<html><head></head><body>\
             <nav><a href=\"/\">skip</a></nav><p>keep this.</p>\
             </body></html>",
        )
        .unwrap();
        assert_eq!(article.chunks().len(), 1);
        assert_eq!(article.chunks()[0].text().raw(), "keep this.");
    }

    #[test]
    fn totals_sum_all_chunks() {
        let article = Article::from_html(
            "<html><body><p>one two three.</p><p>four five.</p></body></html>",
        )
        .unwrap();
        let totals = article.totals();
        assert_eq!(totals.words, 5);
        assert_eq!(totals.sentences, 2);
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn class_stats_accumulate_per_token() {
        let article = Article::from_html(
            "<html><body>\
             <p class=\"lead\">one two.</p>\
             <p class=\"lead wide\">three four five.</p>\
             </body></html>",
        )
        .unwrap();
        let stats = article.class_stats();
        let lead = stats["lead"];
        assert_eq!(lead.words, 5);
        assert_eq!(lead.sentences, 2);
        assert_eq!(lead.count, 2);
        assert_eq!(stats["wide"].count, 1);
        assert!(!stats.contains_key("missing"));
    }

    #[test]
    fn cluster_stats_promote_to_most_populous_ancestor() {
        // Three paragraphs under one div: each paragraph's own group holds
        // one chunk, the shared div holds three, so every chunk is
        // attributed to the div-level group.
        let article = Article::from_html(
            "<html><body><div>\
             <p>alpha beta.</p><p>gamma delta.</p><p>epsilon zeta.</p>\
             </div></body></html>",
        )
        .unwrap();
        let clusters = article.cluster_stats();
        assert_eq!(clusters.len(), 3);
        for stat in clusters {
            assert_eq!(stat.count, 3);
            assert_eq!(stat.words, 6);
            assert_eq!(stat.sentences, 3);
        }
    }

    #[test]
    fn cluster_tie_keeps_the_deeper_group() {
        // A single paragraph: its block group and the body group both count
        // one chunk; the tie must resolve to the deeper paragraph group.
        let article =
            Article::from_html("<html><body><p>only paragraph here.</p></body></html>").unwrap();
        let clusters = article.cluster_stats();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 1);
        assert_eq!(clusters[0].words, 3);
    }

    #[test]
    fn ancestor_mask_reaches_chunks() {
        let article = Article::from_html(
            "<html><body><article><p>inside</p></article><p>outside</p></body></html>",
        )
        .unwrap();
        let chunks = article.chunks();
        assert!(chunks[0].ancestors().contains(Ancestors::ARTICLE));
        assert!(chunks[1].ancestors().is_empty());
    }
}
