//! Database connection management

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use super::migrations;

/// Failures of the local profile and report cache store
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database could not be opened, read or written
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The on-disk schema is newer than this build or could not be upgraded
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored profile or cached report list is not valid JSON for its type,
    /// or a record could not be serialized for writing
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;

        // WAL keeps readers from seeing a half-applied write
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        // Concurrent sessions wait instead of failing with SQLITE_BUSY
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        migrations::run_migrations(&conn)?;

        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    /// Create an in-memory database (for testing)
    ///
    /// # Errors
    /// Returns an error if the database cannot be created
    pub fn in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Close the connection
    ///
    /// # Errors
    /// Returns an error if `SQLite` cannot finalize the connection
    pub fn close(self) -> Result<(), DatabaseError> {
        self.conn.close().map_err(|(_, e)| DatabaseError::Sqlite(e))
    }

    /// Get a reference to the connection
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
