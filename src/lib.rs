//! # pressclip
//!
//! Extracts the editorial text of a news article from an arbitrary HTML
//! page, discarding navigation, boilerplate, teasers, and advertisements.
//!
//! The pipeline reduces the cleaned DOM to a linear sequence of text
//! *chunks* (one per text node, heading, or anchor), computes a feature
//! vector per chunk from structural, lexical, and aggregate signals, and
//! classifies each chunk with a trained linear model. Accepted chunks are
//! assembled back into headings and paragraphs.
//!
//! ## Quick start
//!
//! ```rust
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><h1>Quarterly results beat every forecast</h1>
//! <p>Revenue climbed again this quarter, the third rise in a row.
//! Margins widened too, and the outlook was raised.</p></article>
//! </body></html>"#;
//!
//! let article = pressclip::extract(html)?;
//! println!("{}", article.title());
//! for fragment in article.fragments() {
//!     println!("{}", fragment.text());
//! }
//! # Ok::<(), pressclip::Error>(())
//! ```
//!
//! For link-mode pages (front pages, section indexes), [`Website`] lists
//! every outbound anchor and advertised RSS feed instead.

mod error;

pub mod article;
pub mod chunk;
pub mod classifier;
pub mod cleaner;
pub mod document;
pub mod encoding;
pub mod features;
pub mod link_density;
pub mod links;
pub mod output;
pub mod patterns;
pub mod text;

pub use article::Article;
pub use chunk::{Ancestors, Chunk};
pub use classifier::ChunkClassifier;
pub use document::Document;
pub use error::{Error, Result};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT};
pub use link_density::LinkDensityMap;
pub use links::{Link, Website};
pub use output::{ArticleText, Fragment};
pub use text::{Text, TextBuilder, TextStat};

/// Extract the article text of an HTML page using the shipped classifier.
///
/// # Errors
///
/// Returns an [`Error`] when the document cannot be parsed into the
/// `<html>`/`<head>`/`<body>` structure the pipeline requires.
pub fn extract(html: &str) -> Result<ArticleText> {
    let article = Article::from_html(html)?;
    Ok(assemble_article(&article))
}

/// Extract article text from raw HTML bytes, transcoding to UTF-8 first.
///
/// # Errors
///
/// Same conditions as [`extract`].
pub fn extract_bytes(html: &[u8]) -> Result<ArticleText> {
    let article = Article::from_bytes(html)?;
    Ok(assemble_article(&article))
}

fn assemble_article(article: &Article) -> ArticleText {
    let classifier = ChunkClassifier::new();
    let accepted = classifier.extract(article);
    let mut result = ArticleText::new(article.title());
    for fragment in output::assemble(&accepted) {
        result.push(fragment);
    }
    result
}
