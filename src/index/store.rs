//! SQLite-backed document index
//!
//! The index stores one row per crawled page plus an inverted postings table,
//! and scores retrieval with TF-IDF over the content field.

use crate::index::schema::{initialize_schema, schema_is_present};
use crate::index::tokenizer;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("database at {0} exists but is not a document index")]
    Corrupt(PathBuf),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// A stored document as returned from the index
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub content: String,
}

/// One ranked search result
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub content: String,
    pub score: f64,
}

/// An indexed term with the number of documents it occurs in
#[derive(Debug, Clone)]
pub struct TermEntry {
    pub term: String,
    pub doc_frequency: u64,
}

/// Persistent document index over SQLite
pub struct SearchIndex {
    conn: Connection,
}

impl SearchIndex {
    /// Opens the index at the given path, creating it when absent
    ///
    /// The two cases are branched explicitly so they stay distinguishable:
    /// a missing file becomes a fresh empty index, while an existing file
    /// that lacks the index tables is reported as [`IndexError::Corrupt`]
    /// rather than silently re-initialized.
    pub fn open(path: &Path) -> IndexResult<Self> {
        let already_exists = path.exists();
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;

        if already_exists {
            if !schema_is_present(&conn)? {
                return Err(IndexError::Corrupt(path.to_path_buf()));
            }
        } else {
            initialize_schema(&conn)?;
        }

        Ok(Self { conn })
    }

    /// Creates an in-memory index (for tests and throwaway runs)
    pub fn open_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )
    }

    /// Stores a document, making its content searchable
    ///
    /// The document's content is tokenized once here, with the same
    /// normalization queries get at search time. The document row and all of
    /// its postings are written in a single transaction, so a concurrent
    /// reader never observes a half-indexed document. Re-adding a URL
    /// replaces the earlier document entirely (last write wins).
    pub fn add_document(&mut self, url: &str, title: &str, content: &str) -> IndexResult<()> {
        let frequencies = tokenizer::term_frequencies(content);
        let token_count: u32 = frequencies.values().sum();
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM documents WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;

        let doc_id = match existing {
            Some(id) => {
                tx.execute("DELETE FROM postings WHERE doc_id = ?1", params![id])?;
                tx.execute(
                    "UPDATE documents SET title = ?1, content = ?2, token_count = ?3, added_at = ?4
                     WHERE id = ?5",
                    params![title, content, token_count, now, id],
                )?;
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO documents (url, title, content, token_count, added_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![url, title, content, token_count, now],
                )?;
                tx.last_insert_rowid()
            }
        };

        {
            let mut stmt =
                tx.prepare("INSERT INTO postings (term, doc_id, frequency) VALUES (?1, ?2, ?3)")?;
            for (term, frequency) in &frequencies {
                stmt.execute(params![term, doc_id, frequency])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Searches the content field and returns ranked results
    ///
    /// The query is tokenized with the index tokenizer, then each candidate
    /// document is scored as
    ///
    /// ```text
    /// score(d) = sum over query terms t:  tf(t, d) * ln(1 + N / df(t))
    /// ```
    ///
    /// where N is the corpus size and df(t) the number of documents
    /// containing t. Only documents matching at least one term are returned;
    /// results are ordered by descending score, with equal scores falling
    /// back to insertion order.
    pub fn search(&self, query: &str) -> IndexResult<Vec<SearchHit>> {
        let mut terms = tokenizer::tokenize(query);
        terms.sort();
        terms.dedup();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let corpus_size = self.document_count()?;
        if corpus_size == 0 {
            return Ok(Vec::new());
        }

        let mut scores: HashMap<i64, f64> = HashMap::new();
        for term in &terms {
            let postings = self.postings_for(term)?;
            if postings.is_empty() {
                continue;
            }
            let idf = (1.0 + corpus_size as f64 / postings.len() as f64).ln();
            for (doc_id, frequency) in postings {
                *scores.entry(doc_id).or_insert(0.0) += f64::from(frequency) * idf;
            }
        }

        let mut scored: Vec<(i64, f64)> = scores.into_iter().collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut hits = Vec::with_capacity(scored.len());
        for (doc_id, score) in scored {
            let doc = self.get_document_by_id(doc_id)?;
            hits.push(SearchHit {
                url: doc.url,
                title: doc.title,
                content: doc.content,
                score,
            });
        }

        Ok(hits)
    }

    /// Returns the number of stored documents
    pub fn document_count(&self) -> IndexResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Gets a stored document by URL
    pub fn get_document(&self, url: &str) -> IndexResult<Option<StoredDocument>> {
        let doc = self
            .conn
            .query_row(
                "SELECT id, url, title, content FROM documents WHERE url = ?1",
                params![url],
                |row| {
                    Ok(StoredDocument {
                        id: row.get(0)?,
                        url: row.get(1)?,
                        title: row.get(2)?,
                        content: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(doc)
    }

    /// Returns all stored documents in insertion order
    pub fn documents(&self) -> IndexResult<Vec<StoredDocument>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, title, content FROM documents ORDER BY id ASC")?;

        let docs = stmt
            .query_map([], |row| {
                Ok(StoredDocument {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(docs)
    }

    /// Returns every indexed term with its document frequency
    ///
    /// This is the dictionary the spell corrector is built from.
    pub fn vocabulary(&self) -> IndexResult<Vec<TermEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT term, COUNT(*) FROM postings GROUP BY term ORDER BY term ASC")?;

        let entries = stmt
            .query_map([], |row| {
                Ok(TermEntry {
                    term: row.get(0)?,
                    doc_frequency: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn postings_for(&self, term: &str) -> IndexResult<Vec<(i64, u32)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT doc_id, frequency FROM postings WHERE term = ?1")?;

        let postings = stmt
            .query_map(params![term], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(postings)
    }

    fn get_document_by_id(&self, doc_id: i64) -> IndexResult<StoredDocument> {
        let doc = self.conn.query_row(
            "SELECT id, url, title, content FROM documents WHERE id = ?1",
            params![doc_id],
            |row| {
                Ok(StoredDocument {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                })
            },
        )?;
        Ok(doc)
    }
}
