//! Run orchestration
//!
//! Input checks, store query, text extraction, the locator batch and the
//! output copy, in that order. The locator itself never fails; every error
//! here comes from a collaborator.

use crate::config::RunConfig;
use crate::error::{HighlighterError, Result};
use crate::report;
use crate::store::{BookSummary, HighlightStore};
use highlight_core::{BatchOutcome, Locator};
use highlight_pdf::{extract_corpus, page_count, write_highlighted_copy};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub book: String,
    pub outcome: BatchOutcome,
    pub output: PathBuf,
    pub annotations: usize,
    pub pages: usize,
    pub fuzzy_enabled: bool,
}

/// Result of the connectivity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub book: String,
    pub highlights: i64,
    pub pdf_pages: u32,
    pub pdf_size_bytes: u64,
}

fn ensure_inputs(config: &RunConfig) -> Result<()> {
    if !config.pdf.exists() {
        return Err(HighlighterError::CorpusUnavailable(format!(
            "PDF not found: {}",
            config.pdf.display()
        )));
    }
    if !config.database.exists() {
        return Err(HighlighterError::StoreUnavailable(format!(
            "database not found: {}",
            config.database.display()
        )));
    }
    Ok(())
}

fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        HighlighterError::CorpusUnavailable(format!("cannot read {}: {}", path.display(), e))
    })
}

/// Locate every highlight of the configured book and write the output copy
pub async fn run(config: &RunConfig) -> Result<RunSummary> {
    ensure_inputs(config)?;

    let store = HighlightStore::open(&config.database).await?;
    let records = store.highlights_for_book(&config.book).await?;
    store.close().await;

    if records.is_empty() {
        warn!("No highlights found for book '{}'", config.book);
    } else {
        info!("Found {} highlights for '{}'", records.len(), config.book);
    }
    if config.is_limited() {
        info!("Test run: processing at most {:?} highlights", config.limit);
    }

    let pdf_bytes = read_pdf(&config.pdf)?;
    let corpus = extract_corpus(&pdf_bytes)
        .map_err(|e| HighlighterError::CorpusUnavailable(e.to_string()))?;
    info!("Extracted text from {} pages", corpus.len());

    let mut locator = Locator::new(config.colors);
    if let Some(fuzzy) = config.fuzzy {
        info!("Fuzzy fallback enabled (threshold {})", fuzzy.threshold);
        locator = locator.with_fuzzy(fuzzy);
    }
    let outcome = locator.run_batch_with(&records, &corpus, config.limit, |index, total, result| {
        debug!(
            "Highlight {}/{}: found={} occurrences={} fuzzy={:?} text={:?}",
            index + 1,
            total,
            result.found,
            result.occurrence_count,
            result.fuzzy_match.as_ref().map(|m| m.score),
            result.record.preview(report::PREVIEW_CHARS)
        );
    });

    let copy = write_highlighted_copy(&pdf_bytes, &outcome.results, &config.annotate)
        .map_err(HighlighterError::Annotation)?;
    std::fs::write(&config.output, &copy.bytes).map_err(|source| HighlighterError::OutputWrite {
        path: config.output.clone(),
        source,
    })?;
    info!("Saved PDF: {}", config.output.display());

    let summary = RunSummary {
        book: config.book.clone(),
        outcome,
        output: config.output.clone(),
        annotations: copy.annotations,
        pages: corpus.len(),
        fuzzy_enabled: config.fuzzy.is_some(),
    };

    if let Some(path) = &config.json {
        report::write_json(path, &summary)?;
        info!("Saved JSON report: {}", path.display());
    }

    Ok(summary)
}

/// Verify that the database and PDF are usable without processing anything
pub async fn check(config: &RunConfig) -> Result<CheckSummary> {
    ensure_inputs(config)?;

    let store = HighlightStore::open(&config.database).await?;
    let highlights = store.count_for_book(&config.book).await?;
    store.close().await;

    let pdf_bytes = read_pdf(&config.pdf)?;
    let pdf_pages =
        page_count(&pdf_bytes).map_err(|e| HighlighterError::CorpusUnavailable(e.to_string()))?;

    Ok(CheckSummary {
        book: config.book.clone(),
        highlights,
        pdf_pages,
        pdf_size_bytes: pdf_bytes.len() as u64,
    })
}

pub async fn list_books(database: &Path) -> Result<Vec<BookSummary>> {
    let store = HighlightStore::open(database).await?;
    let books = store.list_books().await?;
    store.close().await;
    Ok(books)
}
