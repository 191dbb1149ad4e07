//! Per-page text extraction from source documents

use std::path::Path;

use tracing::{debug, warn};
use zubrilka_domain::PageText;

/// Document formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF, extracted page by page
    Pdf,
    /// Plain text (or anything that reads as UTF-8), one page total
    PlainText,
}

impl DocumentKind {
    /// Classify a document by its file extension
    ///
    /// Unknown extensions are treated as plain text; the read itself
    /// decides whether the bytes are usable.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Stateless extractor producing per-page text from a document path
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Create an extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the page texts of a document, in document order
    ///
    /// Page indices are zero-based document page numbers; a page whose
    /// text cannot be extracted is skipped and leaves a gap. An
    /// unreadable or unparseable document yields an empty vector.
    pub fn extract_pages(&self, path: &Path) -> Vec<PageText> {
        match DocumentKind::from_path(path) {
            DocumentKind::Pdf => self.extract_pdf(path),
            DocumentKind::PlainText => self.extract_plain_text(path),
        }
    }

    fn extract_pdf(&self, path: &Path) -> Vec<PageText> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let doc = match lopdf::Document::load_mem(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                // Corrupt or unsupported PDF structure. Not an error at the
                // job level: the run completes with zero cards.
                warn!("failed to parse {} as PDF: {}", path.display(), e);
                return Vec::new();
            }
        };

        let mut pages = Vec::new();
        for (page_num, _) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(text) if !text.trim().is_empty() => {
                    pages.push(PageText::new(page_num.saturating_sub(1) as usize, text));
                }
                Ok(_) => {
                    debug!("page {} of {} has no extractable text", page_num, path.display());
                }
                Err(e) => {
                    debug!("skipping page {} of {}: {}", page_num, path.display(), e);
                }
            }
        }

        debug!("extracted {} page(s) from {}", pages.len(), path.display());
        pages
    }

    fn extract_plain_text(&self, path: &Path) -> Vec<PageText> {
        match std::fs::read_to_string(path) {
            Ok(text) if !text.trim().is_empty() => vec![PageText::new(0, text)],
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
