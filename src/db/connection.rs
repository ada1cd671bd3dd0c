//! Database connection management
//!
//! Owns the single SQLite connection used by every data access call.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

/// Database error types
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(rusqlite::Error),

    #[error("SQLite error: {0}")]
    Statement(#[from] rusqlite::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown column '{column}' for table '{table}'")]
    UnknownColumn { table: &'static str, column: String },

    #[error("{operation} requires at least one column")]
    EmptyFields { operation: &'static str },
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Single owned SQLite connection.
///
/// Not `Clone` and not shared: every operation borrows the one connection in turn.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if missing) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to open database");
            DbError::Connection(e)
        })?;

        tracing::info!(path = %path.display(), "opened database");
        Self::init(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(DbError::Connection)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> DbResult<Self> {
        // Enable foreign keys so products cannot reference a missing shop
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(DbError::Connection)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute a closure with the database connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        f(&self.conn)
    }

    /// Close the connection, reporting any error SQLite raises while doing so
    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, e)| {
            tracing::error!(error = %e, "failed to close database");
            DbError::Connection(e)
        })?;
        tracing::info!("closed database");
        Ok(())
    }
}
