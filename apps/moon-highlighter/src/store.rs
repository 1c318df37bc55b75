//! Moon+ Reader highlight store
//!
//! Reads the `notes` table of the reader's backup database. Rows with an
//! empty `bookmark` are highlights; everything else is a bookmark.

use crate::error::{HighlighterError, Result};
use highlight_core::HighlightRecord;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// Raw `notes` columns; any of them may be NULL in real exports.
/// `original` is read as bytes since exports can hold invalid UTF-8.
#[derive(Debug, sqlx::FromRow)]
struct NoteRow {
    color: Option<i64>,
    length: Option<i64>,
    original: Option<Vec<u8>>,
}

impl NoteRow {
    fn has_invalid_text(&self) -> bool {
        self.original
            .as_deref()
            .is_some_and(|bytes| std::str::from_utf8(bytes).is_err())
    }
}

impl From<NoteRow> for HighlightRecord {
    fn from(row: NoteRow) -> Self {
        let text = row
            .original
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        HighlightRecord::new(
            text,
            row.length.unwrap_or(0),
            // ARGB values are 32-bit; some exports widen them to unsigned
            row.color.unwrap_or(0) as i32,
        )
    }
}

/// A book name with its highlight count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BookSummary {
    pub book: String,
    pub highlights: i64,
}

pub struct HighlightStore {
    pool: SqlitePool,
}

impl HighlightStore {
    /// Open an existing database read-only
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HighlighterError::StoreUnavailable(format!(
                "database not found: {}",
                path.display()
            )));
        }

        tracing::debug!("Opening highlight database: {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Highlights for one book, in insertion order
    pub async fn highlights_for_book(&self, book: &str) -> Result<Vec<HighlightRecord>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT CAST(highlightColor AS INTEGER) AS color,
                   CAST(highlightLength AS INTEGER) AS length,
                   CAST(original AS BLOB) AS original
            FROM notes
            WHERE book = ? AND bookmark = ''
            ORDER BY rowid
            "#,
        )
        .bind(book)
        .fetch_all(&self.pool)
        .await?;

        let missing_text = rows.iter().filter(|r| r.original.is_none()).count();
        if missing_text > 0 {
            tracing::warn!(
                "{} highlight(s) for '{}' have no text and will be reported as not found",
                missing_text,
                book
            );
        }
        let invalid_text = rows.iter().filter(|r| r.has_invalid_text()).count();
        if invalid_text > 0 {
            tracing::warn!(
                "{} highlight(s) for '{}' have invalid UTF-8 text; bad bytes were replaced",
                invalid_text,
                book
            );
        }

        Ok(rows.into_iter().map(HighlightRecord::from).collect())
    }

    pub async fn count_for_book(&self, book: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notes WHERE book = ? AND bookmark = ''
            "#,
        )
        .bind(book)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Books that have at least one highlight, by name
    pub async fn list_books(&self) -> Result<Vec<BookSummary>> {
        let books = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT book, COUNT(*) AS highlights
            FROM notes
            WHERE bookmark = '' AND book IS NOT NULL
            GROUP BY book
            ORDER BY book
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn notes_pool(path: &Path) -> SqlitePool {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE notes (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                book TEXT,
                filename TEXT,
                highlightColor INTEGER,
                highlightLength INTEGER,
                bookmark TEXT,
                original TEXT,
                note TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    async fn seeded_store() -> (TempDir, HighlightStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mrbooks.db");
        let pool = notes_pool(&path).await;

        let rows: &[(&str, Option<i64>, Option<i64>, &str, Option<&str>)] = &[
            ("a.pdf", Some(-256), Some(5), "", Some("first")),
            ("b.pdf", Some(1996532479), Some(5), "", Some("other book")),
            ("a.pdf", Some(16711680), Some(6), "", Some("second")),
            ("a.pdf", Some(-256), Some(0), "chapter 2", Some("a bookmark")),
            ("a.pdf", None, None, "", None),
            ("a.pdf", Some(2298413056), Some(5), "", Some("wide")),
        ];
        for (book, color, length, bookmark, original) in rows {
            sqlx::query(
                "INSERT INTO notes (book, highlightColor, highlightLength, bookmark, original) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(*book)
            .bind(*color)
            .bind(*length)
            .bind(*bookmark)
            .bind(*original)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool.close().await;

        let store = HighlightStore::open(&path).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_highlights_filter_book_and_bookmarks() {
        let (_dir, store) = seeded_store().await;
        let records = store.highlights_for_book("a.pdf").await.unwrap();

        let texts: Vec<&str> = records.iter().map(|r| r.snippet_text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "", "wide"]);
        assert_eq!(records[0].color_code, -256);
        assert_eq!(records[1].declared_length, 6);
    }

    #[tokio::test]
    async fn test_null_columns_become_defaults() {
        let (_dir, store) = seeded_store().await;
        let records = store.highlights_for_book("a.pdf").await.unwrap();
        assert_eq!(records[2], HighlightRecord::new("", 0, 0));
    }

    #[tokio::test]
    async fn test_unsigned_color_wraps_to_argb() {
        let (_dir, store) = seeded_store().await;
        let records = store.highlights_for_book("a.pdf").await.unwrap();
        assert_eq!(records[3].color_code, -1996554240);
    }

    #[tokio::test]
    async fn test_invalid_utf8_text_keeps_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mrbooks.db");
        let pool = notes_pool(&path).await;
        sqlx::query(
            r#"
            INSERT INTO notes (book, highlightColor, highlightLength, bookmark, original)
            VALUES ('a.pdf', -256, 4, '', 'good'),
                   ('a.pdf', -256, 2, '', CAST(x'C328' AS TEXT)),
                   ('a.pdf', -256, 9, '', 'also good')
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;

        let store = HighlightStore::open(&path).await.unwrap();
        let records = store.highlights_for_book("a.pdf").await.unwrap();

        let texts: Vec<&str> = records.iter().map(|r| r.snippet_text.as_str()).collect();
        assert_eq!(texts, vec!["good", "\u{FFFD}(", "also good"]);
        assert_eq!(records[1].declared_length, 2);
    }

    #[tokio::test]
    async fn test_unknown_book_is_empty() {
        let (_dir, store) = seeded_store().await;
        assert!(store.highlights_for_book("missing.pdf").await.unwrap().is_empty());
        assert_eq!(store.count_for_book("missing.pdf").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_and_list_books() {
        let (_dir, store) = seeded_store().await;
        assert_eq!(store.count_for_book("a.pdf").await.unwrap(), 4);

        let books = store.list_books().await.unwrap();
        assert_eq!(
            books,
            vec![
                BookSummary {
                    book: "a.pdf".to_string(),
                    highlights: 4
                },
                BookSummary {
                    book: "b.pdf".to_string(),
                    highlights: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_database_is_unavailable() {
        let result = HighlightStore::open(Path::new("/nonexistent/mrbooks.db")).await;
        assert!(matches!(result, Err(HighlighterError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_missing_table_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await.unwrap();
        let store = HighlightStore::from_pool(pool);

        let result = store.highlights_for_book("a.pdf").await;
        assert!(matches!(result, Err(HighlighterError::StoreUnavailable(_))));
    }
}
