//! Zubrilka Text Extraction
//!
//! Turns an uploaded document on disk into a sequence of per-page text
//! blocks for the generation pipeline. PDF documents are parsed with
//! `lopdf` and walked page by page; plain-text documents count as a
//! single page.
//!
//! Extraction is deliberately infallible: a document that cannot be read
//! or parsed yields an empty page sequence. The job layer treats that as
//! a normal run that produces zero cards, not as a failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod extractor;

pub use extractor::{DocumentExtractor, DocumentKind};
