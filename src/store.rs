// 📚 Entry Store - the one I/O boundary of the browser
// "select all fields, ordered by id ascending" - nothing else

use crate::config::StoreConfig;
use crate::db::{self, Entry};
use crate::error::StoreError;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use tracing::debug;

// ============================================================================
// QUERY INTERFACE
// ============================================================================

/// Read-only collection of entries
pub trait EntryStore: Send {
    /// Every entry, ordered by id ascending
    fn fetch_all(&mut self) -> Result<Vec<Entry>, StoreError>;

    /// Short label for logs ("sqlite:pokedex.db", "rest:https://...")
    fn describe(&self) -> String;
}

// ============================================================================
// SQLITE STORE
// ============================================================================

pub struct SqliteStore {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Point at a database file; it is opened lazily on the first query
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    /// Wrap an already-open connection (tests, in-memory databases)
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            conn: Some(conn),
        }
    }

    fn connection(&mut self) -> Result<&Connection, StoreError> {
        if self.conn.is_none() {
            // No CREATE flag: a missing file is a query failure, not a fresh empty db
            // (read-write so WAL's -shm file can be recreated; nothing is written)
            let conn = Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            debug!(path = ?self.path, "opened sqlite store");
            self.conn = Some(conn);
        }

        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::Other("sqlite connection unavailable".to_string()))
    }
}

impl EntryStore for SqliteStore {
    fn fetch_all(&mut self) -> Result<Vec<Entry>, StoreError> {
        let conn = self.connection()?;
        Ok(db::get_all_entries(conn)?)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Build the store named by the configuration
pub fn open_store(config: &StoreConfig) -> Box<dyn EntryStore> {
    match config {
        StoreConfig::Sqlite { path } => Box::new(SqliteStore::new(path.clone())),
        #[cfg(feature = "remote")]
        StoreConfig::Rest { url, api_key, table } => Box::new(crate::remote::RestStore::new(
            url.clone(),
            api_key.clone(),
            table.clone(),
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
