use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension};

use crate::db::get_connection;
use crate::error::{ExpenseError, Result};
use crate::models::User;
use crate::password::{hash_password, is_hashed, verify_password};

/// Insert a new account with a hashed password. Returns the new row id.
/// The username is stored exactly as given.
pub fn insert_user(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    if username.trim().is_empty() {
        return Err(ExpenseError::InvalidInput("Username must not be empty".into()));
    }
    if password.is_empty() {
        return Err(ExpenseError::InvalidInput("Password must not be empty".into()));
    }
    let hash = hash_password(password)?;
    match conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        rusqlite::params![username, hash],
    ) {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(ExpenseError::DuplicateUsername(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up an account by exact username and verify the password.
/// Legacy plaintext passwords are re-hashed on a successful match.
pub fn find_user(conn: &Connection, username: &str, password: &str) -> Result<Option<User>> {
    let row: Option<(i64, String, Option<String>)> = conn
        .query_row(
            "SELECT id, username, password FROM users WHERE username = ?1",
            [username],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;

    let Some((id, username, stored)) = row else {
        return Ok(None);
    };
    let stored = stored.unwrap_or_default();
    if !verify_password(password, &stored) {
        return Ok(None);
    }
    if !is_hashed(&stored) {
        let hash = hash_password(password)?;
        conn.execute("UPDATE users SET password = ?1 WHERE id = ?2", rusqlite::params![hash, id])?;
        tracing::info!(%username, "upgraded legacy plaintext password");
    }
    Ok(Some(User { id, username }))
}

pub fn user_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?)
}

/// Register an account against the database at `db_path`.
pub fn register(db_path: &Path, username: &str, password: &str) -> Result<User> {
    let conn = get_connection(db_path)?;
    let id = insert_user(&conn, username, password).inspect_err(|e| {
        tracing::warn!(%username, error = %e, "registration rejected");
    })?;
    tracing::info!(%username, id, "user registered");
    Ok(User {
        id,
        username: username.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_register_and_find() {
        let (_dir, conn) = test_db();
        let id = insert_user(&conn, "amy", "pw1").unwrap();
        let user = find_user(&conn, "amy", "pw1").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "amy");
    }

    #[test]
    fn test_password_not_stored_in_clear() {
        let (_dir, conn) = test_db();
        insert_user(&conn, "amy", "pw1").unwrap();
        let stored: String = conn
            .query_row("SELECT password FROM users WHERE username = 'amy'", [], |r| r.get(0))
            .unwrap();
        assert_ne!(stored, "pw1");
        assert!(is_hashed(&stored));
    }

    #[test]
    fn test_duplicate_username_keeps_one_row() {
        let (_dir, conn) = test_db();
        insert_user(&conn, "amy", "pw1").unwrap();
        let err = insert_user(&conn, "amy", "other").unwrap_err();
        assert!(matches!(err, ExpenseError::DuplicateUsername(ref u) if u == "amy"));
        let count: i64 = conn
            .query_row("SELECT count(*) FROM users WHERE username = 'amy'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        // First password still works
        assert!(find_user(&conn, "amy", "pw1").unwrap().is_some());
    }

    #[test]
    fn test_wrong_password_and_unknown_user() {
        let (_dir, conn) = test_db();
        insert_user(&conn, "amy", "pw1").unwrap();
        assert!(find_user(&conn, "amy", "PW1").unwrap().is_none());
        assert!(find_user(&conn, "bob", "pw1").unwrap().is_none());
        assert!(find_user(&conn, "Amy", "pw1").unwrap().is_none());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let (_dir, conn) = test_db();
        assert!(matches!(insert_user(&conn, " ", "pw").unwrap_err(), ExpenseError::InvalidInput(_)));
        assert!(matches!(insert_user(&conn, "amy", "").unwrap_err(), ExpenseError::InvalidInput(_)));
        assert_eq!(user_count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_legacy_plaintext_is_upgraded_on_login() {
        let (_dir, conn) = test_db();
        conn.execute("INSERT INTO users (username, password) VALUES ('old', 'letmein')", []).unwrap();
        assert!(find_user(&conn, "old", "wrong").unwrap().is_none());
        assert!(find_user(&conn, "old", "letmein").unwrap().is_some());
        let stored: String = conn
            .query_row("SELECT password FROM users WHERE username = 'old'", [], |r| r.get(0))
            .unwrap();
        assert!(is_hashed(&stored));
        assert!(find_user(&conn, "old", "letmein").unwrap().is_some());
    }

    #[test]
    fn test_username_matches_exactly() {
        let (_dir, conn) = test_db();
        conn.execute("INSERT INTO users (username, password) VALUES (' bob', 'pw')", []).unwrap();
        assert!(find_user(&conn, " bob", "pw").unwrap().is_some());
        assert!(find_user(&conn, "bob", "pw").unwrap().is_none());

        insert_user(&conn, "amy ", "pw1").unwrap();
        assert!(find_user(&conn, "amy ", "pw1").unwrap().is_some());
        assert!(find_user(&conn, "amy", "pw1").unwrap().is_none());
    }

    #[test]
    fn test_register_opens_its_own_connection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        init_db(&get_connection(&path).unwrap()).unwrap();
        let user = register(&path, "amy", "pw").unwrap();
        assert_eq!(user.username, "amy");
        assert!(matches!(
            register(&path, "amy", "pw").unwrap_err(),
            ExpenseError::DuplicateUsername(_)
        ));
    }
}
