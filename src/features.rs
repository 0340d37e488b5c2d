//! Per-chunk feature vectors for the linear classifier.
//!
//! Every chunk is converted to a fixed-length vector mixing local signals
//! (counts, tag, containers, link density), neighbour context, and the
//! aggregate class/cluster/document statistics. The column order here and
//! the weight order in [`crate::classifier`] must stay in lockstep.

use std::collections::HashMap;

use crate::article::Article;
use crate::chunk::Ancestors;
use crate::text::TextStat;

/// Number of columns in a feature vector.
pub const FEATURE_COUNT: usize = 31;

/// A chunk's feature vector.
pub type FeatureVector = [f32; FEATURE_COUNT];

/// Computes feature vectors for one article's chunks.
///
/// The aggregate statistics are computed once at construction and shared by
/// every per-chunk call.
pub struct FeatureExtractor<'a> {
    article: &'a Article,
    class_stats: HashMap<String, TextStat>,
    cluster_stats: Vec<TextStat>,
    totals: TextStat,
}

impl<'a> FeatureExtractor<'a> {
    #[must_use]
    pub fn new(article: &'a Article) -> Self {
        Self {
            article,
            class_stats: article.class_stats(),
            cluster_stats: article.cluster_stats(),
            totals: article.totals(),
        }
    }

    /// The feature vector for the chunk at `index`.
    ///
    /// Column layout:
    /// - 0–1: word and sentence count
    /// - 2–5: enclosing article / aside / blockquote / list containers
    /// - 6–15: base tag one-hot (h1..h6, a, p, li, other)
    /// - 16: link density of the base element
    /// - 17–22: previous / next neighbour context (shared block, word and
    ///   sentence deltas); zero when the neighbour is absent
    /// - 23–25: class-statistic maxima (words, sentences, count)
    /// - 26–28: cluster statistic (words, sentences, count)
    /// - 29–30: share of the document's words and sentences
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for the article's chunks.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn features(&self, index: usize) -> FeatureVector {
        let chunks = self.article.chunks();
        let chunk = &chunks[index];
        let mut features = [0.0f32; FEATURE_COUNT];

        features[0] = chunk.text().words() as f32;
        features[1] = chunk.text().sentences() as f32;

        let ancestors = chunk.ancestors();
        features[2] = indicator(ancestors.contains(Ancestors::ARTICLE));
        features[3] = indicator(ancestors.contains(Ancestors::ASIDE));
        features[4] = indicator(ancestors.contains(Ancestors::BLOCKQUOTE));
        features[5] = indicator(ancestors.contains(Ancestors::LIST));

        features[6 + tag_column(chunk.base_tag())] = 1.0;

        features[16] = self.article.link_density(chunk.base());

        if let Some(prev) = chunk.prev().map(|i| &chunks[i]) {
            features[17] = indicator(prev.block() == chunk.block());
            features[18] = chunk.text().words() as f32 - prev.text().words() as f32;
            features[19] = chunk.text().sentences() as f32 - prev.text().sentences() as f32;
        }
        if let Some(next) = chunk.next().map(|i| &chunks[i]) {
            features[20] = indicator(next.block() == chunk.block());
            features[21] = chunk.text().words() as f32 - next.text().words() as f32;
            features[22] = chunk.text().sentences() as f32 - next.text().sentences() as f32;
        }

        let mut class_max = TextStat::default();
        for class in chunk.classes() {
            if let Some(stat) = self.class_stats.get(class) {
                class_max.words = class_max.words.max(stat.words);
                class_max.sentences = class_max.sentences.max(stat.sentences);
                class_max.count = class_max.count.max(stat.count);
            }
        }
        features[23] = class_max.words as f32;
        features[24] = class_max.sentences as f32;
        features[25] = class_max.count as f32;

        let cluster = self.cluster_stats.get(index).copied().unwrap_or_default();
        features[26] = cluster.words as f32;
        features[27] = cluster.sentences as f32;
        features[28] = cluster.count as f32;

        if self.totals.words > 0 {
            features[29] = chunk.text().words() as f32 / self.totals.words as f32;
        }
        if self.totals.sentences > 0 {
            features[30] = chunk.text().sentences() as f32 / self.totals.sentences as f32;
        }

        features
    }
}

fn indicator(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// One-hot column offset for the base tag, within the 6..=15 range.
fn tag_column(tag: &str) -> usize {
    match tag {
        "h1" => 0,
        "h2" => 1,
        "h3" => 2,
        "h4" => 3,
        "h5" => 4,
        "h6" => 5,
        "a" => 6,
        "p" => 7,
        "li" => 8,
        _ => 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(html: &str) -> Article {
        Article::from_html(html).unwrap()
    }

    #[test]
    fn vector_has_fixed_length() {
        let article = article("<html><body><p>some text here.</p></body></html>");
        let extractor = FeatureExtractor::new(&article);
        assert_eq!(extractor.features(0).len(), FEATURE_COUNT);
    }

    #[test]
    fn local_counts_and_tag_bits() {
        let article = article("<html><body><h1>News</h1><p>Hello world.</p></body></html>");
        let extractor = FeatureExtractor::new(&article);

        let heading = extractor.features(0);
        assert_eq!(heading[0], 1.0);
        assert_eq!(heading[1], 0.0);
        assert_eq!(heading[6], 1.0);
        assert_eq!(heading[13], 0.0);

        let paragraph = extractor.features(1);
        assert_eq!(paragraph[0], 2.0);
        assert_eq!(paragraph[1], 1.0);
        assert_eq!(paragraph[13], 1.0);
    }

    #[test]
    fn container_bits_follow_ancestors() {
        let article = article(
            "<html><body><article><p>inside piece.</p></article><p>outside piece.</p></body></html>",
        );
        let extractor = FeatureExtractor::new(&article);
        assert_eq!(extractor.features(0)[2], 1.0);
        assert_eq!(extractor.features(1)[2], 0.0);
    }

    #[test]
    fn neighbour_context_zero_at_endpoints() {
        let article = article("<html><body><p>one two.</p><p>three.</p></body></html>");
        let extractor = FeatureExtractor::new(&article);

        let first = extractor.features(0);
        assert_eq!(first[17], 0.0);
        assert_eq!(first[18], 0.0);
        // Different paragraph blocks, so no shared-block bit; delta is set.
        assert_eq!(first[20], 0.0);
        assert_eq!(first[21], 1.0);

        let second = extractor.features(1);
        assert_eq!(second[18], -1.0);
        assert_eq!(second[20], 0.0);
    }

    #[test]
    fn shared_block_bit_for_intra_paragraph_neighbours() {
        let article = article(
            "<html><body><p>start <a href=\"/x\">link text</a> finish</p></body></html>",
        );
        let extractor = FeatureExtractor::new(&article);
        let middle = extractor.features(1);
        assert_eq!(middle[17], 1.0);
        assert_eq!(middle[20], 1.0);
        assert_eq!(middle[6 + 6], 1.0);
    }

    #[test]
    fn link_density_column_reflects_base() {
        let article = article(
            "<html><body><div><a href=\"/a\">only links</a></div><p>plain words here.</p></body></html>",
        );
        let extractor = FeatureExtractor::new(&article);
        assert!((extractor.features(0)[16] - 1.0).abs() < f32::EPSILON);
        assert_eq!(extractor.features(1)[16], 0.0);
    }

    #[test]
    fn class_columns_take_maxima_over_stats() {
        let article = article(
            "<html><body>\
             <p class=\"one\">a b c.</p>\
             <p class=\"one two\">d e.</p>\
             <p class=\"two\">f g h i j.</p>\
             </body></html>",
        );
        let extractor = FeatureExtractor::new(&article);
        // Chunk 1 carries both classes: words max(one: 5, two: 7) = 7,
        // sentences max(2, 2) = 2, count max(2, 2) = 2.
        let middle = extractor.features(1);
        assert_eq!(middle[23], 7.0);
        assert_eq!(middle[24], 2.0);
        assert_eq!(middle[25], 2.0);
    }

    #[test]
    fn document_ratios_partition_across_chunks() {
        let article = article("<html><body><p>one two three.</p><p>four.</p></body></html>");
        let extractor = FeatureExtractor::new(&article);
        let first = extractor.features(0);
        let second = extractor.features(1);
        assert!((first[29] - 0.75).abs() < 1e-6);
        assert!((second[29] - 0.25).abs() < 1e-6);
        assert!((first[30] - 0.5).abs() < 1e-6);
    }
}
