//! Thin SQLite access layer.
//!
//! A narrow open / execute-batch / row-list contract for application data.
//! The boot pipeline does not touch the store; it exists for the
//! application layers that need persistent state.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

/// Handle to one SQLite database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self, String> {
        let conn = Connection::open(path)
            .map_err(|e| format!("Failed to open database {}: {}", path.display(), e))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory()
            .map_err(|e| format!("Failed to open in-memory database: {}", e))?;
        Ok(Self { conn })
    }

    /// Execute a statement batch that produces no rows.
    pub fn exec_batch(&self, sql: &str) -> Result<(), String> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| format!("Failed to execute batch: {}", e))
    }

    /// Run a single query and return its rows with every value stringified.
    pub fn query(&self, sql: &str) -> Result<Vec<Vec<String>>, String> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| format!("Failed to prepare query: {}", e))?;
        let columns = stmt.column_count();

        let mut rows = stmt
            .query([])
            .map_err(|e| format!("Failed to run query: {}", e))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| format!("Failed to read row: {}", e))?
        {
            let mut record = Vec::with_capacity(columns);
            for index in 0..columns {
                let value = row
                    .get_ref(index)
                    .map_err(|e| format!("Failed to read column {}: {}", index, e))?;
                record.push(render_value(value));
            }
            out.push(record);
        }
        Ok(out)
    }
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(n) => n.to_string(),
        ValueRef::Text(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exec_batch_and_query() {
        let store = Store::open_in_memory().unwrap();
        store
            .exec_batch(
                "CREATE TABLE events (id INTEGER PRIMARY KEY, name TEXT NOT NULL, detail TEXT);
                 INSERT INTO events (name, detail) VALUES ('boot', 'ok');
                 INSERT INTO events (name) VALUES ('shutdown');",
            )
            .unwrap();

        let rows = store
            .query("SELECT name, detail FROM events ORDER BY id")
            .unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["boot".to_string(), "ok".to_string()],
                vec!["shutdown".to_string(), "NULL".to_string()],
            ]
        );
    }

    #[test]
    fn test_open_creates_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.db");
        let store = Store::open(&path).unwrap();
        store.exec_batch("CREATE TABLE t (x INTEGER);").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_bad_sql_is_an_error() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.exec_batch("NOT A STATEMENT").is_err());
        assert!(store.query("SELECT * FROM missing_table").is_err());
    }
}
