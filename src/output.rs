//! Assembling accepted chunks into readable article text.
//!
//! Adjacent chunks that share a block belong to the same line of text and
//! join with a single space; a block change starts a new paragraph. The
//! structured form ([`Fragment`]) distinguishes headings from paragraphs;
//! [`render`] produces the flat terminal string, optionally wrapping
//! headings and emphasized text in bold escape codes.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::chunk::Chunk;
use crate::text::Text;

/// One assembled run of article text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Heading(String),
    Paragraph(String),
}

impl Fragment {
    /// The fragment's text, regardless of kind.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(text) | Self::Paragraph(text) => text,
        }
    }
}

/// Extracted article text: the document title plus assembled fragments.
#[derive(Debug, Clone, Default)]
pub struct ArticleText {
    title: String,
    fragments: Vec<Fragment>,
}

impl ArticleText {
    #[must_use]
    pub fn new(title: &Text) -> Self {
        Self { title: title.raw().to_string(), fragments: Vec::new() }
    }

    /// The document title (may be empty).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The assembled fragments in reading order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// True when the first fragment is a heading.
    #[must_use]
    pub fn starts_with_heading(&self) -> bool {
        matches!(self.fragments.first(), Some(Fragment::Heading(_)))
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }
}

fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_emphasis_tag(tag: &str) -> bool {
    is_heading_tag(tag) || matches!(tag, "em" | "strong" | "b")
}

/// Group accepted chunks into heading/paragraph fragments.
///
/// Chunks sharing a block merge into one fragment; a heading chunk is a
/// block of its own, so it always forms a heading fragment by itself.
#[must_use]
pub fn assemble(chunks: &[&Chunk]) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut run = String::new();
    let mut run_heading = false;
    let mut last_block = None;

    for chunk in chunks {
        if last_block == Some(chunk.block()) {
            run.push(' ');
        } else {
            if !run.is_empty() {
                fragments.push(finish_run(run, run_heading));
            }
            run = String::new();
            run_heading = is_heading_tag(chunk.base_tag());
        }
        run.push_str(chunk.text().raw());
        last_block = Some(chunk.block());
    }
    if !run.is_empty() {
        fragments.push(finish_run(run, run_heading));
    }
    fragments
}

fn finish_run(text: String, heading: bool) -> Fragment {
    if heading {
        Fragment::Heading(text)
    } else {
        Fragment::Paragraph(text)
    }
}

/// Render accepted chunks for the terminal.
///
/// Same-block chunks join with a space, block changes with a blank line.
/// With `highlight` set, headings and emphasized text are wrapped in the
/// bold escape sequence.
#[must_use]
pub fn render(chunks: &[&Chunk], highlight: bool) -> String {
    let mut out = String::new();
    let mut last_block = None;

    for chunk in chunks {
        match last_block {
            Some(block) if block == chunk.block() => out.push(' '),
            Some(_) => out.push_str("\n\n"),
            None => {}
        }
        if highlight && is_emphasis_tag(chunk.base_tag()) {
            let _ = write!(out, "{}", chunk.text().raw().bold());
        } else {
            out.push_str(chunk.text().raw());
        }
        last_block = Some(chunk.block());
    }
    out
}
