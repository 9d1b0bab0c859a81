//! Database layer for the NexaCare core.
//!
//! Repository operations live in per-entity modules as `impl Database`
//! blocks; every operation returns [`DbResult`], translating storage
//! failures into the error taxonomy below before they cross the boundary.

mod schema;
mod ids;
mod accounts;
mod patients;
mod appointments;

pub use accounts::{SEED_ADMIN_ID, SEED_HR_ID};
pub use ids::PATIENT_CODE_PREFIX;
pub use schema::*;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

use crate::validation::ValidationError;

/// Operation-boundary errors. Each variant carries the user-facing
/// message for its failure; callers display, they never re-derive.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection failed")]
    ConnectionFailed(#[source] rusqlite::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Identifier already exists: {0}")]
    DuplicateIdentifier(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Account is not verified yet")]
    AccountNotVerified,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classify storage errors structurally, via extended result codes —
/// never by matching constraint names inside error text.
impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, ref msg) = e {
            if err.code == rusqlite::ErrorCode::ConstraintViolation {
                let detail = msg.clone().unwrap_or_else(|| err.to_string());
                return match err.extended_code {
                    // Duplicate generated id or patient code (email
                    // uniqueness is pre-checked before any insert).
                    rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                        DbError::DuplicateIdentifier(detail)
                    }
                    _ => DbError::Constraint(detail),
                };
            }
        }
        DbError::Sqlite(e)
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper. Owns a single synchronous connection;
/// every operation runs to completion on the calling thread.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating and migrating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(DbError::ConnectionFailed)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open the database at its default application path.
    pub fn open_default() -> DbResult<Self> {
        let path = crate::config::default_db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|_| DbError::Constraint("cannot create data directory".into()))?;
        }
        Self::open(path)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(DbError::ConnectionFailed)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema. Aborts open on failure; no partial schema
    /// is left behind on a fresh database.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("clinic.db"));
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"doctors".to_string()));
        assert!(tables.contains(&"hrs".to_string()));
        assert!(tables.contains(&"admins".to_string()));
        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"appointments".to_string()));
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.db");
        drop(Database::open(&path).unwrap());
        assert!(Database::open(&path).is_ok());
    }

    #[test]
    fn test_connection_failure_message() {
        let err = Database::open("/nonexistent-dir/clinic.db").unwrap_err();
        assert_eq!(err.to_string(), "Database connection failed");
    }
}
