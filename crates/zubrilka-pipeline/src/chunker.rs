//! Paragraph, sentence, and chunk production
//!
//! Pages are split into blank-line paragraphs, paragraphs into sentences,
//! and sentences accumulated into chunks of at least `min_chunk_words`
//! words (any remainder flushes at paragraph end, so short paragraphs
//! still surface as a single chunk). Chunks arrive through a lazy
//! iterator; building a second stream over the same pages replays the
//! identical sequence.

use std::collections::VecDeque;

use tracing::debug;
use zubrilka_domain::{PageText, Sentence, TextChunk};

use crate::config::PipelineConfig;
use crate::text::{fold_lower, normalize_whitespace};

/// Substrings that mark a paragraph as boilerplate rather than prose
const BOILERPLATE_MARKERS: &[&str] = &[
    "http://",
    "https://",
    "www.",
    "©",
    "copyright",
    "все права защищены",
    "scanned by",
    "camscanner",
    "конвертировано",
];

/// Multi-letter abbreviations whose trailing period never ends a sentence
///
/// Single letters followed by a period ("г.", "в.", initials) are covered
/// by a general rule and do not need to be listed.
const ABBREVIATIONS: &[&str] = &[
    "т.д.", "т.п.", "т.е.", "др.", "гг.", "вв.", "н.э.", "см.", "рис.", "стр.", "им.", "млн.",
    "тыс.",
];

/// Splits page text into chunks of accumulated sentences
pub struct Chunker {
    min_paragraph_chars: usize,
    min_chunk_words: usize,
}

impl Chunker {
    /// Create a chunker with the thresholds in `config`
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            min_paragraph_chars: config.min_paragraph_chars,
            min_chunk_words: config.min_chunk_words,
        }
    }

    /// Stream the chunks of a page sequence, lazily and in document order
    pub fn chunks<'a>(&'a self, pages: &'a [PageText]) -> ChunkStream<'a> {
        ChunkStream {
            chunker: self,
            pages,
            next_page: 0,
            paragraphs: VecDeque::new(),
            pending: VecDeque::new(),
        }
    }

    /// Chunk one paragraph; empty when the paragraph is gated out
    fn chunk_paragraph(&self, paragraph: &str, page_index: usize) -> Vec<TextChunk> {
        let text = normalize_whitespace(paragraph);

        if text.chars().count() < self.min_paragraph_chars {
            debug!("dropping short paragraph on page {}", page_index);
            return Vec::new();
        }
        if is_boilerplate(&text) {
            debug!("dropping boilerplate paragraph on page {}", page_index);
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut buffer: Vec<String> = Vec::new();
        let mut buffer_words = 0usize;

        for sentence in split_sentences(&text) {
            buffer_words += sentence.word_count();
            buffer.push(sentence.text);

            if buffer_words >= self.min_chunk_words {
                chunks.push(TextChunk::new(buffer.join(" "), page_index));
                buffer.clear();
                buffer_words = 0;
            }
        }

        // Trailing remainder always flushes so short paragraphs still
        // produce one chunk.
        if !buffer.is_empty() {
            chunks.push(TextChunk::new(buffer.join(" "), page_index));
        }

        chunks
    }
}

/// Lazy chunk iterator over a page sequence
///
/// Holds only the paragraphs of the page currently being walked; chunks
/// for later pages are not computed until the stream reaches them.
pub struct ChunkStream<'a> {
    chunker: &'a Chunker,
    pages: &'a [PageText],
    next_page: usize,
    paragraphs: VecDeque<(String, usize)>,
    pending: VecDeque<TextChunk>,
}

impl Iterator for ChunkStream<'_> {
    type Item = TextChunk;

    fn next(&mut self) -> Option<TextChunk> {
        loop {
            if let Some(chunk) = self.pending.pop_front() {
                return Some(chunk);
            }
            if let Some((paragraph, page_index)) = self.paragraphs.pop_front() {
                self.pending = self
                    .chunker
                    .chunk_paragraph(&paragraph, page_index)
                    .into();
                continue;
            }
            let page = self.pages.get(self.next_page)?;
            self.next_page += 1;
            for paragraph in split_paragraphs(&page.text) {
                self.paragraphs.push_back((paragraph, page.page_index));
            }
        }
    }
}

/// Split text into paragraphs on runs of blank lines
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                paragraphs.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        paragraphs.push(current.trim().to_string());
    }

    paragraphs
}

/// Split text into sentences
///
/// A boundary is a run of terminal punctuation (`.`, `!`, `?`) followed
/// by whitespace and a capitalized word. A lone period closing a known
/// abbreviation (or a single letter, which covers initials and the
/// year/century markers) does not end the sentence.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if !matches!(chars[i], '.' | '!' | '?') {
            i += 1;
            continue;
        }

        // Absorb the whole punctuation run ("...", "?!")
        let mut end = i + 1;
        while end < chars.len() && matches!(chars[end], '.' | '!' | '?') {
            end += 1;
        }

        // A boundary needs whitespace and then an uppercase letter
        let mut next_word = end;
        while next_word < chars.len() && chars[next_word].is_whitespace() {
            next_word += 1;
        }
        let followed_by_capital =
            next_word > end && next_word < chars.len() && chars[next_word].is_uppercase();

        let lone_period = chars[i] == '.' && end == i + 1;
        let abbreviation = lone_period && is_abbreviation(&tail_word(&chars, i, start));

        if followed_by_capital && !abbreviation {
            let sentence = Sentence::new(&chars[start..end].iter().collect::<String>());
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = next_word;
            i = next_word;
        } else {
            i = end;
        }
    }

    if start < chars.len() {
        let sentence = Sentence::new(&chars[start..].iter().collect::<String>());
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }

    sentences
}

/// The word ending at `dot_idx`, including the dot and any interior dots
fn tail_word(chars: &[char], dot_idx: usize, start: usize) -> String {
    let mut begin = dot_idx;
    while begin > start && !chars[begin - 1].is_whitespace() {
        begin -= 1;
    }
    chars[begin..=dot_idx].iter().collect()
}

fn is_abbreviation(word: &str) -> bool {
    let folded = fold_lower(word);
    let mut cs = folded.chars();
    if let (Some(first), Some('.'), None) = (cs.next(), cs.next(), cs.next()) {
        if first.is_alphabetic() {
            return true;
        }
    }
    ABBREVIATIONS.contains(&folded.as_str())
}

fn is_boilerplate(paragraph: &str) -> bool {
    let folded = fold_lower(paragraph);
    BOILERPLATE_MARKERS.iter().any(|m| folded.contains(m))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: sentence splitting drops only whitespace
        #[test]
        fn test_split_sentences_conserves_text(s in "\\PC*") {
            let joined: String = split_sentences(&s)
                .iter()
                .flat_map(|sentence| sentence.text.chars())
                .filter(|c| !c.is_whitespace())
                .collect();
            let original: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(joined, original);
        }

        /// Property: splitting never yields an empty sentence
        #[test]
        fn test_split_sentences_never_empty(s in "\\PC*") {
            for sentence in split_sentences(&s) {
                prop_assert!(!sentence.is_empty());
            }
        }
    }
}
