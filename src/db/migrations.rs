// src/db/migrations.rs
//
// Schema setup for the key-value store
//
// One schema version exists. A fresh file gets `schema.sql` and a version
// row; any other recorded version is refused rather than guessed at.

use rusqlite::{Connection, OptionalExtension};
use crate::error::{AppError, AppResult};

const SCHEMA_VERSION: i32 = 1;

/// Create the schema on a fresh database. Safe to call on every start.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
             version    INTEGER PRIMARY KEY,
             applied_at TEXT NOT NULL
         );",
    )?;

    match recorded_version(conn)? {
        None => {
            conn.execute_batch(include_str!("../../schema.sql"))
                .map_err(|e| AppError::Other(format!("Failed to apply schema: {}", e)))?;
            record_version(conn, SCHEMA_VERSION)?;
            log::info!("Initialized database schema v{}", SCHEMA_VERSION);
            Ok(())
        }
        Some(SCHEMA_VERSION) => Ok(()),
        Some(other) => Err(AppError::Other(format!(
            "Unsupported database schema version {} (expected {})",
            other, SCHEMA_VERSION
        ))),
    }
}

fn recorded_version(conn: &Connection) -> AppResult<Option<i32>> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })
        .optional()?
        .flatten();
    Ok(version)
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Verify database integrity
///
/// Runs SQLite's integrity check.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!("Database integrity check failed: {}", result)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        assert_eq!(recorded_version(&conn).unwrap(), Some(SCHEMA_VERSION));

        let kv_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='kv_store')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(kv_exists);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();
        assert_eq!(recorded_version(&conn).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_unknown_schema_version_is_rejected() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        record_version(&conn, 99).unwrap();

        let err = initialize_database(&conn).unwrap_err();
        assert!(err.to_string().contains("schema version 99"));
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        verify_database_integrity(&conn).unwrap();
    }
}
