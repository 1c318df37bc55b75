//! Fixtures for end-to-end tests: a Moon+ Reader notes database and a text PDF

#![allow(dead_code)]

use lopdf::{content::Content, content::Operation, dictionary, Document, Object, Stream};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};

/// One `notes` row: (book, highlightColor, highlightLength, bookmark, original)
pub type NoteRow<'a> = (&'a str, i64, i64, &'a str, &'a str);

pub async fn create_notes_db(path: &Path, rows: &[NoteRow<'_>]) {
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
            original TEXT
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

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
}

/// Write a PDF with one Helvetica text line per page
pub fn create_text_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).unwrap();
}

/// Count `/Highlight` annotations across all pages
pub fn count_highlights(path: &Path) -> usize {
    let doc = Document::load(path).unwrap();
    let mut count = 0;
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else {
            continue;
        };
        for annot in annots {
            let dict = match annot {
                Object::Reference(id) => doc.get_dictionary(*id).ok(),
                Object::Dictionary(d) => Some(d),
                _ => None,
            };
            let subtype = dict.and_then(|d| d.get(b"Subtype").and_then(Object::as_name).ok());
            if subtype == Some(b"Highlight".as_slice()) {
                count += 1;
            }
        }
    }
    count
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub pdf: PathBuf,
    pub database: PathBuf,
}

impl Fixture {
    pub async fn new(pages: &[&str], rows: &[NoteRow<'_>]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("livro.pdf");
        let database = dir.path().join("mrbooks.db");
        create_text_pdf(&pdf, pages);
        create_notes_db(&database, rows).await;
        Self { dir, pdf, database }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
