//! PDF side of the highlighter
//!
//! This crate turns a PDF into a page-ordered text corpus and writes the
//! output copy with highlight annotations using lopdf.
//!
//! - `corpus`: text extraction via pdf-extract, one string per page
//! - `annotate`: output copy with one `/Highlight` annotation per located record

pub mod annotate;
pub mod corpus;
pub mod error;

pub use annotate::{write_highlighted_copy, AnnotateOptions, AnnotatedPdf};
pub use corpus::{extract_corpus, page_count};
pub use error::PdfError;
