//! Database schema for the document index

use rusqlite::Connection;

/// SQL schema for the index database
pub const SCHEMA_SQL: &str = r#"
-- Stored document fields, one row per crawled page.
-- The rowid doubles as insertion order for ranking tie-breaks.
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    token_count INTEGER NOT NULL,
    added_at TEXT NOT NULL
);

-- Inverted postings: one row per (term, document) with the term's
-- occurrence count in that document's content.
CREATE TABLE IF NOT EXISTS postings (
    term TEXT NOT NULL,
    doc_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    frequency INTEGER NOT NULL,
    PRIMARY KEY (term, doc_id)
);

CREATE INDEX IF NOT EXISTS idx_postings_term ON postings(term);
"#;

/// Initializes the index schema on an open connection
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Checks whether an existing database carries the expected index tables
///
/// Used to tell "index missing" apart from "file exists but is not an index".
pub fn schema_is_present(conn: &Connection) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('documents', 'postings')",
        [],
        |row| row.get(0),
    )?;
    Ok(count == 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_initializes_cleanly() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        assert!(schema_is_present(&conn).unwrap());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert!(schema_is_present(&conn).unwrap());
    }

    #[test]
    fn test_empty_database_has_no_schema() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!schema_is_present(&conn).unwrap());
    }
}
