//! BrainStore - read-only access to a neural memory database.

use std::path::Path;

use rusqlite::{Connection, Transaction};

use crate::db::open_read_only;
use crate::error::AnalyticsError;

/// Read-only handle on a brain database.
///
/// Owns the single SQLite connection used for a report run. The connection
/// is closed when the store is dropped, on success and failure alike.
/// Queries run through [`BrainStore::snapshot`] so a report sees one
/// consistent view of the store.
pub struct BrainStore {
    conn: Connection,
}

impl BrainStore {
    /// Open an existing brain database read-only.
    ///
    /// Fails with [`AnalyticsError::StoreUnavailable`] if the file does not
    /// exist or is not a readable SQLite database; the store is never created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let conn = open_read_only(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection (useful for testing).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Start a deferred read transaction so a sequence of queries sees one snapshot.
    pub(crate) fn snapshot(&self) -> Result<Transaction<'_>, AnalyticsError> {
        Ok(self.conn.unchecked_transaction()?)
    }
}
