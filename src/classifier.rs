//! Linear article/boilerplate classifier over chunk features.
//!
//! A plain linear model: intercept plus dot product, accept when the score
//! is positive. The weights were fitted offline on hand-labelled news pages
//! and ship as constant data; there is no training code in this crate.

use crate::article::Article;
use crate::chunk::Chunk;
use crate::features::{FeatureExtractor, FeatureVector, FEATURE_COUNT};

/// Decision threshold bias.
const INTERCEPT: f32 = -1.294_08;

/// One weight per feature column, in [`FeatureExtractor::features`] order.
const WEIGHTS: [f32; FEATURE_COUNT] = [
    0.040_913,  // word count
    0.349_27,   // sentence count
    0.553_71,   // inside <article>
    -0.903_44,  // inside <aside>
    0.174_82,   // inside <blockquote>
    -0.298_13,  // inside a list
    0.281_09,   // base tag h1
    0.314_32,   // base tag h2
    0.192_14,   // base tag h3
    0.083_57,   // base tag h4
    0.021_41,   // base tag h5
    -0.037_92,  // base tag h6
    -1.176_68,  // base tag a
    0.725_53,   // base tag p
    -0.471_26,  // base tag li
    0.062_71,   // other base tag
    -2.454_37,  // link density of base
    0.312_84,   // prev shares block
    0.000_62,   // word delta to prev
    0.017_08,   // sentence delta to prev
    0.297_46,   // next shares block
    0.000_91,   // word delta to next
    0.014_63,   // sentence delta to next
    0.000_74,   // class stat: max words
    0.012_19,   // class stat: max sentences
    -0.021_77,  // class stat: max count
    0.001_83,   // cluster stat: words
    0.045_41,   // cluster stat: sentences
    0.031_28,   // cluster stat: count
    0.853_66,   // share of document words
    0.602_38,   // share of document sentences
];

/// Classifies chunks as article text or boilerplate.
///
/// Stateless and trivially shareable; one instance can serve any number of
/// documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkClassifier;

impl ChunkClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Raw decision score for one feature vector.
    #[must_use]
    pub fn score(&self, features: &FeatureVector) -> f32 {
        WEIGHTS
            .iter()
            .zip(features)
            .fold(INTERCEPT, |sum, (weight, feature)| sum + weight * feature)
    }

    /// Accept the chunk when its score is positive.
    #[must_use]
    pub fn predict(&self, features: &FeatureVector) -> bool {
        self.score(features) > 0.0
    }

    /// The article's chunks that classify as article text, in order.
    #[must_use]
    pub fn extract<'a>(&self, article: &'a Article) -> Vec<&'a Chunk> {
        let extractor = FeatureExtractor::new(article);
        article
            .chunks()
            .iter()
            .enumerate()
            .filter(|(index, _)| self.predict(&extractor.features(*index)))
            .map(|(_, chunk)| chunk)
            .collect()
    }
}
