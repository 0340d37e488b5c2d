//! Word and sentence accounting for extracted text.
//!
//! Everything the scoring pipeline knows about a piece of text is collected
//! while the text is being written: the number of words (runs of letters or
//! digits) and the number of sentences (terminal `.` `?` `!` followed by
//! whitespace or end of input). Whitespace runs are collapsed to a single
//! space so downstream output never carries source indentation.

use std::fmt;

/// Scanner state while accumulating codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Space,
    Word,
    Punct,
}

/// A finalized piece of text together with its word and sentence counts.
///
/// Produced by [`TextBuilder::finish`]. Always satisfies
/// `words() >= sentences()`: a sentence is only counted after at least one
/// word entered it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    raw: String,
    words: usize,
    sentences: usize,
}

impl Text {
    /// The accumulated text, with whitespace runs collapsed and edges trimmed.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of whitespace-delimited runs of letters or digits.
    #[must_use]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Number of terminal `.` `?` `!` followed by whitespace or end of input.
    #[must_use]
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    /// True if no word was ever written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Mutable accumulator producing a [`Text`].
///
/// Codepoints drive a three-state scanner (space / word / punctuation):
/// a letter or digit entering from space or punctuation starts a new word;
/// whitespace entering from punctuation closes a sentence. Any other
/// codepoint leaves the state unchanged, so `3.14` counts as two words and
/// no sentence while `done."` still closes one.
#[derive(Debug)]
pub struct TextBuilder {
    raw: String,
    words: usize,
    sentences: usize,
    state: ScanState,
}

impl TextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: String::new(),
            words: 0,
            sentences: 0,
            state: ScanState::Space,
        }
    }

    /// Append a single codepoint, updating the word/sentence counters.
    pub fn push(&mut self, ch: char) {
        if ch.is_whitespace() {
            if self.state == ScanState::Punct {
                self.sentences += 1;
            }
            self.state = ScanState::Space;
            // Collapse whitespace runs and drop leading whitespace entirely.
            if !self.raw.is_empty() && !self.raw.ends_with(' ') {
                self.raw.push(' ');
            }
            return;
        }

        if ch.is_alphanumeric() {
            if self.state != ScanState::Word {
                self.words += 1;
            }
            self.state = ScanState::Word;
        } else if matches!(ch, '.' | '?' | '!') {
            // Terminal punctuation only ends a sentence when it follows a
            // word; stray dots between spaces stay in the Space state.
            if self.state == ScanState::Word {
                self.state = ScanState::Punct;
            }
        }
        self.raw.push(ch);
    }

    /// Append every codepoint of `s`.
    pub fn push_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.push(ch);
        }
    }

    /// True if no word has been written so far.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Snapshot the counters into a finalized [`Text`].
    ///
    /// Terminal punctuation at end of input counts as one more sentence.
    #[must_use]
    pub fn finish(mut self) -> Text {
        if self.state == ScanState::Punct {
            self.sentences += 1;
        }
        if self.raw.ends_with(' ') {
            self.raw.pop();
        }
        Text {
            raw: self.raw,
            words: self.words,
            sentences: self.sentences,
        }
    }
}

impl Default for TextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate word/sentence totals over a group of texts.
///
/// Used for both per-class and per-cluster statistics: `count` is the number
/// of contributing chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStat {
    pub words: usize,
    pub sentences: usize,
    pub count: usize,
}

impl TextStat {
    /// Fold one more text into the aggregate.
    pub fn add(&mut self, text: &Text) {
        self.words += text.words();
        self.sentences += text.sentences();
        self.count += 1;
    }
}
