//! Page text extraction
//!
//! pdf-extract handles CID fonts and ToUnicode CMaps, so the text here is
//! what the reader most likely copied when the highlight was made.

use crate::error::PdfError;
use highlight_core::PageCorpus;
use tracing::debug;

/// Extract one plain-text string per page, in page order
pub fn extract_corpus(bytes: &[u8]) -> Result<PageCorpus, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError::ParseError(e.to_string()))?;

    let corpus = PageCorpus::from_pages(pages);
    debug!(
        pages = corpus.len(),
        chars = corpus.char_count(),
        "Extracted page text"
    );
    Ok(corpus)
}

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<u32, PdfError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| PdfError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_text_pdf;

    #[test]
    fn test_extract_keeps_page_order() {
        let pdf = create_text_pdf(&["Alpha page", "Beta page", "Gamma page"]);
        let corpus = extract_corpus(&pdf).unwrap();

        assert_eq!(corpus.len(), 3);
        assert!(corpus.page(0).unwrap().contains("Alpha"));
        assert!(corpus.page(1).unwrap().contains("Beta"));
        assert!(corpus.page(2).unwrap().contains("Gamma"));
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let result = extract_corpus(b"not a pdf at all");
        assert!(matches!(result, Err(PdfError::ParseError(_))));
    }

    #[test]
    fn test_page_count() {
        let pdf = create_text_pdf(&["one", "two"]);
        assert_eq!(page_count(&pdf).unwrap(), 2);
    }
}
