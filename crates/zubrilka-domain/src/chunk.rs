//! Ephemeral text units flowing through the generation pipeline
//!
//! None of these are persisted; they exist between extraction and card
//! assembly and are dropped when the job finishes.

/// Text extracted from one page of a source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Zero-based position in the extracted page sequence
    pub page_index: usize,

    /// Raw extracted text for the page
    pub text: String,
}

impl PageText {
    /// Create a page record
    pub fn new(page_index: usize, text: String) -> Self {
        Self { page_index, text }
    }
}

/// A chunk of accumulated sentences emitted by the chunker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text (one or more sentences, single-space joined)
    pub text: String,

    /// Page the chunk's paragraph came from
    pub page_index: usize,

    /// Whitespace-separated word count of `text`
    pub word_count: usize,
}

impl TextChunk {
    /// Create a chunk, deriving its word count from the text
    pub fn new(text: String, page_index: usize) -> Self {
        let word_count = text.split_whitespace().count();
        Self {
            text,
            page_index,
            word_count,
        }
    }
}

/// One sentence under consideration by the analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Verbatim sentence text, edge-trimmed
    pub text: String,
}

impl Sentence {
    /// Create a sentence, trimming edge whitespace
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
        }
    }

    /// Character count (code points, not bytes)
    ///
    /// Cyrillic text is two bytes per letter in UTF-8, so byte length
    /// must never be used for threshold checks.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whitespace-separated word count
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether the sentence is empty after trimming
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
