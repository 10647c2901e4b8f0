use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::Result;

pub const DB_FILE: &str = "expenses.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    category TEXT,
    description TEXT,
    amount REAL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE,
    password TEXT
);
";

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    Ok(conn)
}

/// Create both tables if they are missing. Safe to call on every startup.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Create the data directory and database file, then ensure the schema.
pub fn ensure_schema(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = get_connection(db_path)?;
    init_db(&conn)?;
    tracing::debug!(path = %db_path.display(), "schema ensured");
    Ok(())
}

/// Read a numeric column leniently. The `amount` column has REAL affinity
/// but older databases may hold text that SQLite could not coerce; those
/// read as 0.0, the same value `SUM()` assigns them.
pub fn numeric_value(value: ValueRef<'_>) -> f64 {
    match value {
        ValueRef::Integer(i) => i as f64,
        ValueRef::Real(f) => f,
        ValueRef::Text(t) => {
            let text = String::from_utf8_lossy(t);
            match text.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    tracing::warn!(value = %text, "non-numeric amount read as 0");
                    0.0
                }
            }
        }
        ValueRef::Null | ValueRef::Blob(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["expenses", "users"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO expenses (date, category, description, amount) VALUES ('2025-01-01', 'Food', 'Lunch', 12.5)",
            [],
        )
        .unwrap();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_ensure_schema_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = db_path(&dir.path().join("nested").join("data"));
        ensure_schema(&path).unwrap();
        assert!(path.exists());
        ensure_schema(&path).unwrap();
    }

    #[test]
    fn test_username_is_unique() {
        let (_dir, conn) = test_db();
        conn.execute("INSERT INTO users (username, password) VALUES ('amy', 'x')", []).unwrap();
        let dup = conn.execute("INSERT INTO users (username, password) VALUES ('amy', 'y')", []);
        assert!(dup.is_err());
    }

    #[test]
    fn test_numeric_value_handles_legacy_text() {
        assert_eq!(numeric_value(ValueRef::Integer(3)), 3.0);
        assert_eq!(numeric_value(ValueRef::Real(2.5)), 2.5);
        assert_eq!(numeric_value(ValueRef::Text(b" 7.25 ")), 7.25);
        assert_eq!(numeric_value(ValueRef::Text(b"abc")), 0.0);
        assert_eq!(numeric_value(ValueRef::Null), 0.0);
    }
}
